//! Borrowed, side-partitioned view over a snapshot.
//!
//! Built once per analysis call so each analyzer does not re-filter the
//! sample list. Holds references only; the snapshot itself is never mutated.

use super::sample::{PlayerPositionSample, Side};

#[derive(Debug, Clone, Default)]
pub struct SnapshotView<'a> {
    pub samples: &'a [PlayerPositionSample],
    /// Every T sample, dead or alive
    pub t_all: Vec<&'a PlayerPositionSample>,
    /// Every CT sample, dead or alive
    pub ct_all: Vec<&'a PlayerPositionSample>,
    pub t_alive: Vec<&'a PlayerPositionSample>,
    pub ct_alive: Vec<&'a PlayerPositionSample>,
}

impl<'a> SnapshotView<'a> {
    pub fn new(samples: &'a [PlayerPositionSample], alive_health_min: f64) -> Self {
        let mut view = SnapshotView {
            samples,
            ..Default::default()
        };

        for sample in samples {
            let alive = sample.is_alive(alive_health_min);
            match sample.side {
                Side::T => {
                    view.t_all.push(sample);
                    if alive {
                        view.t_alive.push(sample);
                    }
                }
                Side::Ct => {
                    view.ct_all.push(sample);
                    if alive {
                        view.ct_alive.push(sample);
                    }
                }
            }
        }

        view
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn all(&self, side: Side) -> &[&'a PlayerPositionSample] {
        match side {
            Side::T => &self.t_all,
            Side::Ct => &self.ct_all,
        }
    }

    pub fn alive(&self, side: Side) -> &[&'a PlayerPositionSample] {
        match side {
            Side::T => &self.t_alive,
            Side::Ct => &self.ct_alive,
        }
    }

    /// Alive players of both sides.
    pub fn alive_players(&self) -> impl Iterator<Item = &'a PlayerPositionSample> + '_ {
        self.t_alive.iter().chain(self.ct_alive.iter()).copied()
    }

    pub fn alive_count(&self) -> usize {
        self.t_alive.len() + self.ct_alive.len()
    }
}
