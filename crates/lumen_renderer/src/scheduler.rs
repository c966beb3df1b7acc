//! Progressive multi-worker accumulation scheduler.
//!
//! A render is an endless stream of row jobs: each job adds
//! `samples_per_pass` samples to every pixel of one scanline. Rows are handed
//! out by a cursor that wraps at the image height, so every row keeps
//! receiving samples and the picture refines over time. A row that is still
//! being rendered is skipped until its job ends, so no two jobs ever share a
//! row.
//!
//! Anything that changes what workers read (active world, camera, target
//! size or contents) first drains the in-flight jobs and only then mutates.

use crate::renderer::{render_row, RenderConfig};
use crate::scene::World;
use crate::target::RenderTarget;
use crate::{presets, Camera, RenderError, RenderResult};
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard};

/// Worker pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Threads in the render pool
    pub workers: usize,
    /// Upper bound on row jobs queued or running at once
    pub max_in_flight: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self {
            workers,
            max_in_flight: workers,
        }
    }
}

/// Which rows have a job queued or running, and where the next claim starts.
#[derive(Debug)]
struct RowSlots {
    busy: Vec<bool>,
    in_flight: usize,
    cursor: usize,
}

impl RowSlots {
    fn new(height: usize) -> Self {
        Self {
            busy: vec![false; height],
            in_flight: 0,
            cursor: 0,
        }
    }

    /// First free row at or after the cursor, if fewer than `max` jobs (and
    /// fewer than the number of rows) are in flight.
    fn claim(&mut self, max: usize) -> Option<usize> {
        let height = self.busy.len();
        if self.in_flight >= max.min(height) {
            return None;
        }

        let row = (0..height)
            .map(|offset| (self.cursor + offset) % height)
            .find(|&row| !self.busy[row])?;
        self.busy[row] = true;
        self.in_flight += 1;
        self.cursor = (row + 1) % height;
        Some(row)
    }

    fn release(&mut self, row: usize) {
        if let Some(busy) = self.busy.get_mut(row) {
            *busy = false;
        }
        self.in_flight -= 1;
    }
}

/// Row jobs that have been dispatched but not finished.
struct InFlight {
    slots: Mutex<RowSlots>,
    changed: Condvar,
}

impl InFlight {
    fn new(height: usize) -> Self {
        Self {
            slots: Mutex::new(RowSlots::new(height)),
            changed: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RowSlots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim a free row if a slot is available.
    fn try_claim(&self, max: usize) -> Option<usize> {
        self.lock().claim(max)
    }

    /// Claim a free row, blocking until one is available.
    fn claim(&self, max: usize) -> usize {
        let mut slots = self.lock();
        loop {
            if let Some(row) = slots.claim(max) {
                return row;
            }
            slots = self.changed.wait(slots).unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn release(&self, row: usize) {
        self.lock().release(row);
        self.changed.notify_all();
    }

    /// Block until no job is in flight.
    fn wait_idle(&self) {
        let mut slots = self.lock();
        while slots.in_flight > 0 {
            slots = self.changed.wait(slots).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Forget all rows and restart from row 0 at a new height. Only called
    /// once drained.
    fn reset(&self, height: usize) {
        let mut slots = self.lock();
        debug_assert_eq!(slots.in_flight, 0);
        *slots = RowSlots::new(height);
    }

    fn current(&self) -> usize {
        self.lock().in_flight
    }
}

/// Frees a row and its in-flight slot when a job ends, including by panic.
struct SlotGuard<'a> {
    in_flight: &'a InFlight,
    row: usize,
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.release(self.row);
    }
}

/// State shared between the driver and the row workers.
struct Shared<T> {
    target: RwLock<T>,
    active: RwLock<Arc<World>>,
    samples_per_pass: AtomicU32,
    max_depth: u32,
    in_flight: InFlight,
}

impl<T> Shared<T> {
    fn target(&self) -> RwLockReadGuard<'_, T> {
        self.target.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn active(&self) -> Arc<World> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Drives progressive rendering of a set of worlds into one render target.
///
/// There is a single driver: every method that dispatches work or mutates
/// shared state takes `&mut self`.
pub struct ProgressiveRenderer<T: RenderTarget + 'static> {
    shared: Arc<Shared<T>>,
    pool: rayon::ThreadPool,
    max_in_flight: usize,
    worlds: Vec<World>,
    active_index: usize,
}

impl<T: RenderTarget + 'static> ProgressiveRenderer<T> {
    /// Create a renderer over `worlds`, starting with the one named `initial`.
    ///
    /// Every world's camera is set to the target's resolution.
    pub fn new(
        target: T,
        mut worlds: Vec<World>,
        initial: &str,
        config: RenderConfig,
        scheduler: SchedulerConfig,
    ) -> RenderResult<Self> {
        let active_index = worlds
            .iter()
            .position(|world| world.name() == initial)
            .ok_or_else(|| RenderError::UnknownWorld(initial.to_string()))?;

        for world in &mut worlds {
            world.camera.set_resolution(target.width(), target.height())?;
            if world.scene.is_empty() {
                log::warn!("World '{}' has no objects", world.name());
            } else {
                log::debug!("World '{}': {} objects", world.name(), world.scene.len());
            }
        }

        let workers = scheduler.workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("lumen-row-{}", i))
            .build()
            .map_err(|e| RenderError::ThreadPool(e.to_string()))?;

        log::info!(
            "Progressive renderer: {} workers, {} in flight, {}x{}, world '{}'",
            workers,
            scheduler.max_in_flight.max(1),
            target.width(),
            target.height(),
            initial
        );

        let shared = Arc::new(Shared {
            in_flight: InFlight::new(target.height()),
            target: RwLock::new(target),
            active: RwLock::new(Arc::new(worlds[active_index].clone())),
            samples_per_pass: AtomicU32::new(config.samples_per_pass),
            max_depth: config.max_depth,
        });

        Ok(Self {
            shared,
            pool,
            max_in_flight: scheduler.max_in_flight.max(1),
            worlds,
            active_index,
        })
    }

    /// Create a renderer over the built-in presets.
    pub fn with_presets(
        target: T,
        initial: &str,
        config: RenderConfig,
        scheduler: SchedulerConfig,
    ) -> RenderResult<Self> {
        let worlds = presets::build_all(target.width(), target.height())?;
        Self::new(target, worlds, initial, config, scheduler)
    }

    fn spawn_row(&self, row: usize) {
        let shared = Arc::clone(&self.shared);
        let world = shared.active();
        let config = RenderConfig {
            samples_per_pass: shared.samples_per_pass.load(Ordering::Relaxed),
            max_depth: shared.max_depth,
        };

        self.pool.spawn(move || {
            let _slot = SlotGuard {
                in_flight: &shared.in_flight,
                row,
            };
            let target = shared.target();
            render_row(&*target, &world, row, &config, &mut rand::thread_rng());
            log::trace!("Row {} done", row);
        });
    }

    /// Dispatch one row job if a slot and a free row are available.
    /// Returns the row, if any.
    pub fn dispatch(&mut self) -> Option<usize> {
        let row = self.shared.in_flight.try_claim(self.max_in_flight)?;
        self.spawn_row(row);
        Some(row)
    }

    /// Fill every free slot with row jobs. Returns how many were dispatched.
    pub fn pump(&mut self) -> usize {
        let mut dispatched = 0;
        while self.dispatch().is_some() {
            dispatched += 1;
        }
        dispatched
    }

    /// Dispatch exactly one job per row (blocking for slots) and wait for all
    /// of them. Every pixel gains `samples_per_pass` samples.
    pub fn render_pass(&mut self) {
        // From idle the cursor visits each row once before it can meet a busy one
        self.drain();
        for _ in 0..self.height() {
            let row = self.shared.in_flight.claim(self.max_in_flight);
            self.spawn_row(row);
        }
        self.drain();
    }

    /// Block until no row job is in flight.
    pub fn drain(&self) {
        self.shared.in_flight.wait_idle();
    }

    /// Row jobs currently queued or running.
    pub fn in_flight(&self) -> usize {
        self.shared.in_flight.current()
    }

    fn publish_active(&self) {
        let world = Arc::new(self.worlds[self.active_index].clone());
        *self
            .shared
            .active
            .write()
            .unwrap_or_else(PoisonError::into_inner) = world;
    }

    fn target_mut(&self) -> std::sync::RwLockWriteGuard<'_, T> {
        self.shared
            .target
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Switch the active world by name. A no-op if it is already active.
    ///
    /// Unknown names fail before anything is touched.
    pub fn set_world(&mut self, name: &str) -> RenderResult<()> {
        let index = self
            .worlds
            .iter()
            .position(|world| world.name() == name)
            .ok_or_else(|| RenderError::UnknownWorld(name.to_string()))?;
        if index == self.active_index {
            return Ok(());
        }

        self.drain();
        self.active_index = index;
        self.publish_active();
        self.target_mut().clear();
        self.shared.in_flight.reset(self.height());

        log::info!(
            "Switched to world '{}' ({} objects)",
            name,
            self.worlds[index].scene.len()
        );
        Ok(())
    }

    /// Apply a change to the active world's camera.
    ///
    /// Samples taken from the old viewpoint are discarded.
    pub fn update_camera<R>(&mut self, f: impl FnOnce(&mut Camera) -> R) -> R {
        self.drain();
        let result = f(&mut self.worlds[self.active_index].camera);
        self.publish_active();
        self.target_mut().clear();
        log::debug!("Camera moved, accumulation cleared");
        result
    }

    /// Resize the target, keeping its top-left region, and re-aspect every
    /// world's camera.
    pub fn resize(&mut self, width: usize, height: usize) -> RenderResult<()> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidResolution { width, height });
        }

        self.drain();
        let (old_width, old_height) = (self.width(), self.height());
        self.target_mut().resize(width, height)?;
        for world in &mut self.worlds {
            world.camera.set_resolution(width, height)?;
        }
        self.publish_active();
        self.shared.in_flight.reset(height);

        log::info!("Resized {}x{} -> {}x{}", old_width, old_height, width, height);
        Ok(())
    }

    /// Zero the accumulation buffer.
    pub fn clear(&mut self) {
        self.drain();
        self.target_mut().clear();
        log::info!("Accumulation cleared");
    }

    /// Write the current means to `path` as a gamma-corrected image.
    ///
    /// The format is chosen from the file extension.
    pub fn save(&mut self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        self.drain();

        let (width, height, bytes) = {
            let target = self.shared.target();
            (target.width(), target.height(), target.to_rgba())
        };

        image::save_buffer(
            path,
            &bytes,
            width as u32,
            height as u32,
            image::ColorType::Rgba8,
        )?;

        log::info!("Saved {}x{} snapshot to {}", width, height, path.display());
        Ok(())
    }

    pub fn samples_per_pass(&self) -> u32 {
        self.shared.samples_per_pass.load(Ordering::Relaxed)
    }

    /// Change the samples added per row job; takes effect for the next dispatch.
    pub fn set_samples_per_pass(&self, samples: u32) {
        self.shared
            .samples_per_pass
            .store(samples.max(1), Ordering::Relaxed);
    }

    pub fn world_name(&self) -> &str {
        self.worlds[self.active_index].name()
    }

    pub fn world_names(&self) -> impl Iterator<Item = &str> {
        self.worlds.iter().map(World::name)
    }

    pub fn camera(&self) -> &Camera {
        &self.worlds[self.active_index].camera
    }

    pub fn width(&self) -> usize {
        self.shared.target().width()
    }

    pub fn height(&self) -> usize {
        self.shared.target().height()
    }

    /// Read access to the target, e.g. for presentation. Rows that are still
    /// being rendered may be partially updated.
    pub fn target(&self) -> RwLockReadGuard<'_, T> {
        self.shared.target()
    }
}

impl<T: RenderTarget + 'static> Drop for ProgressiveRenderer<T> {
    fn drop(&mut self) {
        // Row jobs are atomic: let the ones already queued finish
        self.drain();
    }
}
