//! Asynchronous model repository.
//!
//! Each descriptor is loaded on its own named background thread; results
//! come back over an `mpsc` channel and are only ever applied on the
//! owning thread via [`ModelRepository::poll`]. Completion order is
//! arbitrary and slots are never pre-allocated.

use std::sync::mpsc;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::descriptor::{AssetDescriptor, SlotId};
use super::loader::ModelLoader;
use super::mesh::MeshGraph;
use crate::error::VitrineError;

/// What a loader thread sends back.
struct LoadOutcome {
    slot: SlotId,
    result: Result<MeshGraph, VitrineError>,
}

/// Repository transitions observed by the owner.
#[derive(Debug)]
pub enum RepositoryEvent {
    /// A slot resolved into geometry.
    Loaded(SlotId, MeshGraph),
    /// A slot failed and will stay empty.
    Failed(SlotId),
    /// Every slot has loaded. Emitted exactly once.
    AllLoaded,
}

/// Tracks asynchronous loads against the expected descriptor count.
pub struct ModelRepository {
    expected: usize,
    loaded: FxHashSet<SlotId>,
    failed: FxHashSet<SlotId>,
    all_loaded_fired: bool,
    result_tx: mpsc::Sender<LoadOutcome>,
    result_rx: Option<mpsc::Receiver<LoadOutcome>>,
}

impl ModelRepository {
    /// Repository expecting `expected` slots.
    #[must_use]
    pub fn new(expected: usize) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        Self {
            expected,
            loaded: FxHashSet::default(),
            failed: FxHashSet::default(),
            all_loaded_fired: false,
            result_tx,
            result_rx: Some(result_rx),
        }
    }

    /// Start one background load per descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::ThreadSpawn`] if a loader thread cannot be
    /// started. Loads already spawned keep running.
    pub fn request_all(
        &mut self,
        descriptors: &[AssetDescriptor],
        loader: &Arc<dyn ModelLoader>,
    ) -> Result<(), VitrineError> {
        for (index, descriptor) in descriptors.iter().enumerate() {
            let slot = SlotId(index);
            let tx = self.result_tx.clone();
            let loader = Arc::clone(loader);
            let file_name = descriptor.file_name.clone();
            let _handle = std::thread::Builder::new()
                .name(format!("asset-loader-{index}"))
                .spawn(move || {
                    let result = loader.load(&file_name);
                    // Receiver gone means the viewport was torn down.
                    let _ = tx.send(LoadOutcome { slot, result });
                })
                .map_err(VitrineError::ThreadSpawn)?;
        }
        log::info!("requested {} model(s)", descriptors.len());
        Ok(())
    }

    /// Drain finished loads without blocking.
    pub fn poll(&mut self) -> Vec<RepositoryEvent> {
        let outcomes: Vec<LoadOutcome> = match &self.result_rx {
            Some(rx) => rx.try_iter().collect(),
            None => return Vec::new(),
        };
        outcomes
            .into_iter()
            .flat_map(|o| self.record(o.slot, o.result))
            .collect()
    }

    /// Apply one completion. Hosts that resolve loads themselves go
    /// through [`Showcase::record_load`](crate::engine::Showcase::record_load).
    pub fn record(
        &mut self,
        slot: SlotId,
        result: Result<MeshGraph, VitrineError>,
    ) -> Vec<RepositoryEvent> {
        if slot.index() >= self.expected {
            log::warn!("ignoring completion for unknown slot {slot}");
            return Vec::new();
        }
        if self.loaded.contains(&slot) || self.failed.contains(&slot) {
            log::warn!("ignoring duplicate completion for slot {slot}");
            return Vec::new();
        }

        match result {
            Ok(graph) => {
                let _ = self.loaded.insert(slot);
                log::info!(
                    "slot {slot} loaded ({}/{})",
                    self.loaded.len(),
                    self.expected
                );
                let mut events = vec![RepositoryEvent::Loaded(slot, graph)];
                if !self.all_loaded_fired && self.loaded.len() == self.expected
                {
                    self.all_loaded_fired = true;
                    log::info!("all {} model(s) loaded", self.expected);
                    events.push(RepositoryEvent::AllLoaded);
                }
                events
            }
            Err(e) => {
                log::error!("slot {slot}: {e}");
                let _ = self.failed.insert(slot);
                vec![RepositoryEvent::Failed(slot)]
            }
        }
    }

    /// Demote a loaded slot to failed (its geometry could not be used).
    /// Withdraws "all loaded" if it had fired.
    pub fn reject(&mut self, slot: SlotId) {
        if self.loaded.remove(&slot) {
            let _ = self.failed.insert(slot);
            self.all_loaded_fired = false;
            log::warn!("slot {slot} rejected after load");
        }
    }

    /// Number of slots expected.
    #[must_use]
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Number of slots loaded so far.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Number of slots that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Whether every slot has loaded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.all_loaded_fired
    }

    /// Detach from loader threads; later completions are dropped.
    pub fn shutdown(&mut self) {
        self.result_rx = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use glam::Vec3;

    use super::*;
    use crate::asset::mesh::cuboid;

    fn graph() -> MeshGraph {
        cuboid("box", Vec3::ONE, [1.0; 4])
    }

    fn count_all_loaded(events: &[RepositoryEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, RepositoryEvent::AllLoaded))
            .count()
    }

    #[test]
    fn all_loaded_fires_once_in_any_order() {
        let mut repo = ModelRepository::new(3);
        let mut fired = 0;
        for slot in [2, 0, 1] {
            fired += count_all_loaded(&repo.record(SlotId(slot), Ok(graph())));
        }
        assert_eq!(fired, 1);
        assert!(repo.is_complete());

        // Re-delivery must not re-fire.
        let again = repo.record(SlotId(1), Ok(graph()));
        assert!(again.is_empty());
    }

    #[test]
    fn failed_slot_blocks_all_loaded() {
        let mut repo = ModelRepository::new(3);
        let mut events = repo.record(SlotId(0), Ok(graph()));
        events.extend(repo.record(
            SlotId(1),
            Err(VitrineError::asset_load("uzi.glb", "corrupt")),
        ));
        events.extend(repo.record(SlotId(2), Ok(graph())));

        assert_eq!(count_all_loaded(&events), 0);
        assert!(!repo.is_complete());
        assert_eq!(repo.loaded_count(), 2);
        assert_eq!(repo.failed_count(), 1);
        assert!(matches!(events[1], RepositoryEvent::Failed(SlotId(1))));
    }

    #[test]
    fn rejected_slot_withdraws_all_loaded_for_good() {
        let mut repo = ModelRepository::new(2);
        let _ = repo.record(SlotId(0), Ok(graph()));
        let events = repo.record(SlotId(1), Ok(graph()));
        assert_eq!(count_all_loaded(&events), 1);

        repo.reject(SlotId(1));
        assert!(!repo.is_complete());
        assert_eq!(repo.loaded_count(), 1);
        assert_eq!(repo.failed_count(), 1);
        // A retry of the rejected slot is a duplicate.
        assert!(repo.record(SlotId(1), Ok(graph())).is_empty());
        assert!(!repo.is_complete());
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let mut repo = ModelRepository::new(1);
        assert!(repo.record(SlotId(5), Ok(graph())).is_empty());
        assert_eq!(repo.loaded_count(), 0);
    }

    struct BoxLoader;

    impl ModelLoader for BoxLoader {
        fn load(&self, file_name: &str) -> Result<MeshGraph, VitrineError> {
            if file_name.starts_with("bad") {
                Err(VitrineError::asset_load(file_name, "nope"))
            } else {
                Ok(cuboid(file_name, Vec3::ONE, [1.0; 4]))
            }
        }
    }

    #[test]
    fn background_loads_arrive_through_poll() {
        let descriptors = vec![
            AssetDescriptor::new("a.glb"),
            AssetDescriptor::new("bad.glb"),
            AssetDescriptor::new("c.glb"),
        ];
        let loader: Arc<dyn ModelLoader> = Arc::new(BoxLoader);
        let mut repo = ModelRepository::new(descriptors.len());
        repo.request_all(&descriptors, &loader).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut events = Vec::new();
        while repo.loaded_count() + repo.failed_count() < 3
            && Instant::now() < deadline
        {
            events.extend(repo.poll());
            std::thread::sleep(Duration::from_millis(2));
        }

        assert_eq!(repo.loaded_count(), 2);
        assert_eq!(repo.failed_count(), 1);
        assert_eq!(count_all_loaded(&events), 0);
    }

    #[test]
    fn shutdown_drops_late_completions() {
        let mut repo = ModelRepository::new(1);
        repo.shutdown();
        assert!(repo.poll().is_empty());
    }
}
