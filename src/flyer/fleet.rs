//! Host-side flyer pool
//!
//! Ticks every live flyer once per frame in spawn order, then drops the
//! ones that have left the play area. A flyer whose tick fails is logged
//! and discarded rather than updated again in a broken state.

use log::{debug, error};

use super::entity::Flyer;
use crate::scene::Scene;

/// What happened during one [`Fleet::update`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FleetReport {
    /// Flyers that were ticked
    pub updated: usize,
    /// Flyers removed after leaving the play area
    pub reaped: usize,
    /// Flyers removed because their tick failed
    pub faulted: usize,
}

#[derive(Debug)]
pub struct Fleet<I> {
    flyers: Vec<Flyer<I>>,
}

impl<I: Clone> Fleet<I> {
    pub fn new() -> Self {
        Self { flyers: Vec::new() }
    }

    pub fn spawn(&mut self, flyer: Flyer<I>) {
        self.flyers.push(flyer);
    }

    pub fn len(&self) -> usize {
        self.flyers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flyers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flyer<I>> {
        self.flyers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Flyer<I>> {
        self.flyers.iter_mut()
    }

    pub fn clear(&mut self) {
        self.flyers.clear();
    }

    /// Tick every flyer, then remove dead and faulted ones
    pub fn update<S>(&mut self, scene: &mut S) -> FleetReport
    where
        S: Scene<Image = I>,
    {
        let mut report = FleetReport::default();
        self.flyers.retain_mut(|flyer| {
            report.updated += 1;
            match flyer.update(scene) {
                Ok(()) if flyer.is_dead() => {
                    report.reaped += 1;
                    false
                }
                Ok(()) => true,
                Err(e) => {
                    error!("discarding flyer {:?}: {}", flyer, e);
                    report.faulted += 1;
                    false
                }
            }
        });
        if report.reaped > 0 || report.faulted > 0 {
            debug!(
                "fleet: {} reaped, {} faulted, {} remaining",
                report.reaped,
                report.faulted,
                self.flyers.len()
            );
        }
        report
    }
}

impl<I: Clone> Default for Fleet<I> {
    fn default() -> Self {
        Self::new()
    }
}
