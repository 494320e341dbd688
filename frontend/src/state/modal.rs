use crate::{
    api::Vehicle,
    config::{MODAL_CLOSE_DELAY, MODAL_OPEN_DELAY},
    utils::time::sleep,
};
use leptos::*;

/// `Closed → Opening → Open` on open, `Open → Closing → Closed` on close.
/// The intermediate phases only exist so CSS transitions can run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// Vehicle detail overlay. Presentation only, never persisted.
#[derive(Clone, Copy)]
pub struct ModalState {
    phase: RwSignal<ModalPhase>,
    selected: RwSignal<Option<Vehicle>>,
    // Bumped on every open/close so a stale timer cannot overwrite a newer action.
    generation: StoredValue<u64>,
}

impl Default for ModalState {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalState {
    pub fn new() -> Self {
        Self {
            phase: create_rw_signal(ModalPhase::Closed),
            selected: create_rw_signal(None),
            generation: store_value(0),
        }
    }

    pub fn phase(&self) -> ReadSignal<ModalPhase> {
        self.phase.read_only()
    }

    pub fn selected_vehicle(&self) -> ReadSignal<Option<Vehicle>> {
        self.selected.read_only()
    }

    /// Mounted: anything but `Closed`.
    pub fn is_open(&self) -> Signal<bool> {
        let phase = self.phase;
        Signal::derive(move || phase.get() != ModalPhase::Closed)
    }

    /// Transition class applied: only while fully `Open`.
    pub fn is_animating(&self) -> Signal<bool> {
        let phase = self.phase;
        Signal::derive(move || phase.get() == ModalPhase::Open)
    }

    fn next_generation(&self) -> u64 {
        self.generation.update_value(|g| *g += 1);
        self.generation.get_value()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.try_get_value() == Some(generation)
    }

    pub async fn open(&self, vehicle: Vehicle) {
        let generation = self.next_generation();
        self.selected.set(Some(vehicle));
        self.phase.set(ModalPhase::Opening);

        sleep(MODAL_OPEN_DELAY).await;
        if self.is_current(generation) {
            self.phase.set(ModalPhase::Open);
        }
    }

    pub async fn close(&self) {
        let generation = self.next_generation();
        self.phase.set(ModalPhase::Closing);

        sleep(MODAL_CLOSE_DELAY).await;
        if self.is_current(generation) {
            self.phase.set(ModalPhase::Closed);
            self.selected.set(None);
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::vehicle;
    use futures::{future::join, FutureExt};

    #[tokio::test]
    async fn open_then_close_walks_every_phase() {
        let runtime = create_runtime();
        let modal = ModalState::new();
        let (is_open, is_animating) = (modal.is_open(), modal.is_animating());
        let moto = vehicle(3, "KLP-4455", "maintenance");

        let opening = modal.open(moto.clone());
        futures::pin_mut!(opening);
        assert!((&mut opening).now_or_never().is_none());
        assert_eq!(modal.phase().get(), ModalPhase::Opening);
        assert!(is_open.get());
        assert!(!is_animating.get());
        opening.await;

        assert_eq!(modal.phase().get(), ModalPhase::Open);
        assert!(is_animating.get());
        assert_eq!(modal.selected_vehicle().get(), Some(moto));

        let closing = modal.close();
        futures::pin_mut!(closing);
        assert!((&mut closing).now_or_never().is_none());
        assert_eq!(modal.phase().get(), ModalPhase::Closing);
        assert!(is_open.get());
        assert!(!is_animating.get());
        closing.await;

        assert_eq!(modal.phase().get(), ModalPhase::Closed);
        assert!(!is_open.get());
        assert!(modal.selected_vehicle().get().is_none());
        runtime.dispose();
    }

    #[tokio::test]
    async fn reopening_during_close_keeps_the_modal_open() {
        let runtime = create_runtime();
        let modal = ModalState::new();
        modal.open(vehicle(1, "ABC-1234", "rented")).await;

        let second = vehicle(2, "XYZ-9876", "available");
        join(modal.close(), modal.open(second.clone())).await;

        assert_eq!(modal.phase().get(), ModalPhase::Open);
        assert_eq!(modal.selected_vehicle().get(), Some(second));
        runtime.dispose();
    }
}
