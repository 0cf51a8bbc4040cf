//! In-memory transit graph: stops, buses, and road distances.
//!
//! The catalogue is append-only during construction and read-only while
//! queries are answered; nothing here mutates after the build phase.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::debug;

use crate::geo::{self, Coordinates};

/// A named stop with geographic coordinates.
#[derive(Debug, Clone)]
pub struct Stop {
    pub name: String,
    pub coordinates: Coordinates,
}

/// A named bus route over an ordered sequence of stop names.
///
/// A non-round trip is operated out-and-back: the declared sequence is
/// traversed forward, then in reverse without repeating the turnaround stop.
#[derive(Debug, Clone)]
pub struct Bus {
    pub name: String,
    pub is_roundtrip: bool,
    pub stops: Vec<String>,
}

/// Route statistics for one bus.
#[derive(Debug, Clone, PartialEq)]
pub struct BusStats {
    pub stop_count: usize,
    pub unique_stop_count: usize,
    pub route_length: f64,
    pub curvature: f64,
}

/// Buses serving one stop, lexicographically sorted and deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct StopStats {
    pub buses: Vec<String>,
}

/// Owns the transit network and answers route and stop queries.
#[derive(Debug, Default)]
pub struct Catalogue {
    stops: HashMap<String, Stop>,
    buses: HashMap<String, Bus>,
    buses_by_stop: HashMap<String, BTreeSet<String>>,
    road_distances: HashMap<String, HashMap<String, f64>>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a stop and register its declared road distances.
    ///
    /// Calling twice with the same name overwrites the coordinates
    /// (last-write-wins) while declared distances accumulate. A declared
    /// stop always gains a served-bus entry, so a stop with zero buses is
    /// still distinguishable from one that was never declared.
    pub fn add_stop(&mut self, name: &str, coordinates: Coordinates, distances: &[(f64, String)]) {
        self.stops.insert(
            name.to_string(),
            Stop {
                name: name.to_string(),
                coordinates,
            },
        );
        self.buses_by_stop.entry(name.to_string()).or_default();
        let outgoing = self.road_distances.entry(name.to_string()).or_default();
        for (meters, other) in distances {
            outgoing.insert(other.clone(), *meters);
        }
        debug!(stop = name, distances = distances.len(), "added stop");
    }

    /// Insert a bus and record it against every distinct stop it references.
    ///
    /// Referenced stop names need not be declared; queries against such
    /// buses simply report partial statistics.
    pub fn add_bus(&mut self, name: &str, is_roundtrip: bool, stops: Vec<String>) {
        for stop in &stops {
            self.buses_by_stop
                .entry(stop.clone())
                .or_default()
                .insert(name.to_string());
        }
        debug!(bus = name, stops = stops.len(), is_roundtrip, "added bus");
        self.buses.insert(
            name.to_string(),
            Bus {
                name: name.to_string(),
                is_roundtrip,
                stops,
            },
        );
    }

    pub fn stop(&self, name: &str) -> Option<&Stop> {
        self.stops.get(name)
    }

    pub fn bus(&self, name: &str) -> Option<&Bus> {
        self.buses.get(name)
    }

    /// All buses, lexicographically sorted by name.
    pub fn buses_sorted(&self) -> Vec<&Bus> {
        let mut buses: Vec<&Bus> = self.buses.values().collect();
        buses.sort_by(|a, b| a.name.cmp(&b.name));
        buses
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    /// Declared road distance from `from` to `to`.
    ///
    /// Edges are directed; when the forward edge is absent the reverse
    /// direction is used, and a pair with no declared edge at all
    /// contributes zero. Every length computation goes through here.
    pub fn distance_between(&self, from: &str, to: &str) -> f64 {
        let forward = self
            .road_distances
            .get(from)
            .and_then(|edges| edges.get(to));
        let meters = forward.or_else(|| {
            self.road_distances
                .get(to)
                .and_then(|edges| edges.get(from))
        });
        meters.copied().unwrap_or(0.0)
    }

    /// Route statistics for the named bus, or `None` if no such bus exists.
    pub fn bus_info(&self, name: &str) -> Option<BusStats> {
        let bus = self.buses.get(name)?;

        let stop_count = if bus.is_roundtrip || bus.stops.is_empty() {
            bus.stops.len()
        } else {
            bus.stops.len() * 2 - 1
        };

        let unique_stop_count = bus
            .stops
            .iter()
            .map(String::as_str)
            .collect::<HashSet<_>>()
            .len();

        let mut route_length = self.declared_length(bus.stops.iter());
        if !bus.is_roundtrip {
            // Asymmetric edges mean the return pass can differ from the
            // outbound pass; both are summed explicitly, never doubled.
            route_length += self.declared_length(bus.stops.iter().rev());
        }

        let mut geo_length = self.geo_length(&bus.stops);
        if !bus.is_roundtrip {
            geo_length *= 2.0;
        }

        let curvature = if geo_length > 0.0 {
            route_length / geo_length
        } else {
            0.0
        };

        Some(BusStats {
            stop_count,
            unique_stop_count,
            route_length,
            curvature,
        })
    }

    /// Buses serving the named stop, or `None` if the stop was never
    /// declared. A declared stop with no buses yields an empty list.
    pub fn stop_info(&self, name: &str) -> Option<StopStats> {
        self.stops.get(name)?;
        let buses = self
            .buses_by_stop
            .get(name)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        Some(StopStats { buses })
    }

    fn declared_length<'a>(&self, stops: impl Iterator<Item = &'a String>) -> f64 {
        let mut total = 0.0;
        let mut previous: Option<&str> = None;
        for stop in stops {
            if let Some(from) = previous {
                total += self.distance_between(from, stop);
            }
            previous = Some(stop.as_str());
        }
        total
    }

    /// Straight-line length over consecutive declared stops. Segments with
    /// an undeclared endpoint are skipped rather than crashing the query.
    fn geo_length(&self, stops: &[String]) -> f64 {
        stops
            .windows(2)
            .filter_map(|pair| {
                let from = self.stops.get(&pair[0])?;
                let to = self.stops.get(&pair[1])?;
                Some(geo::distance(from.coordinates, to.coordinates))
            })
            .sum()
    }
}
