//! Map projection and rendering.
//!
//! [`SphereProjector`] maps the geographic coordinates used by the active
//! buses onto a bounded canvas; [`render_map`] assembles the vector-graphics
//! document in four strict layers: bus polylines, bus name labels, stop
//! circles, stop name labels. Later layers draw on top, and each layer is
//! finished before the next begins.

use std::collections::BTreeSet;

use tracing::debug;

use crate::catalogue::{Bus, Catalogue, Stop};
use crate::geo::Coordinates;
use crate::svg::{self, Color, Point};

const LABEL_FONT_FAMILY: &str = "Verdana";

/// Render configuration decoded from the request document.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub line_width: f64,
    pub stop_radius: f64,
    pub stop_label_font_size: u32,
    pub stop_label_offset: Point,
    pub bus_label_offset: Point,
    pub underlayer_color: Color,
    pub underlayer_width: f64,
    pub color_palette: Vec<Color>,
}

/// Projects geographic coordinates onto the output canvas.
///
/// The zoom factor is chosen so the bounding box of the input coordinates
/// fits inside the canvas minus padding; degenerate spans (all points on one
/// meridian or parallel) leave that axis unconstrained, and a single distinct
/// point collapses the zoom to zero.
#[derive(Debug, Clone, Copy)]
pub struct SphereProjector {
    min_lng: f64,
    max_lat: f64,
    zoom: f64,
    padding: f64,
}

impl SphereProjector {
    /// Build a projector over the given coordinates, or `None` when there is
    /// nothing to project.
    pub fn new(
        points: impl IntoIterator<Item = Coordinates>,
        width: f64,
        height: f64,
        padding: f64,
    ) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut min_lat = first.lat;
        let mut max_lat = first.lat;
        let mut min_lng = first.lng;
        let mut max_lng = first.lng;
        for point in points {
            min_lat = min_lat.min(point.lat);
            max_lat = max_lat.max(point.lat);
            min_lng = min_lng.min(point.lng);
            max_lng = max_lng.max(point.lng);
        }

        let lng_scale = if max_lng != min_lng {
            Some((width - 2.0 * padding) / (max_lng - min_lng))
        } else {
            None
        };
        let lat_scale = if max_lat != min_lat {
            Some((height - 2.0 * padding) / (max_lat - min_lat))
        } else {
            None
        };
        let zoom = match (lng_scale, lat_scale) {
            (Some(lng), Some(lat)) => lng.min(lat),
            (Some(lng), None) => lng,
            (None, Some(lat)) => lat,
            (None, None) => 0.0,
        };

        Some(Self {
            min_lng,
            max_lat,
            zoom,
            padding,
        })
    }

    /// Project geographic coordinates to canvas space. North maps to
    /// smaller y.
    pub fn project(&self, coordinates: Coordinates) -> Point {
        Point {
            x: (coordinates.lng - self.min_lng) * self.zoom + self.padding,
            y: (self.max_lat - coordinates.lat) * self.zoom + self.padding,
        }
    }
}

/// Assemble the schematic map for every bus route in the catalogue.
pub fn render_map(catalogue: &Catalogue, settings: &RenderSettings) -> svg::Document {
    let mut document = svg::Document::new();

    let buses = catalogue.buses_sorted();
    let used_stops: BTreeSet<&str> = buses
        .iter()
        .flat_map(|bus| bus.stops.iter())
        .map(String::as_str)
        .filter(|name| catalogue.stop(name).is_some())
        .collect();

    let coordinates = used_stops
        .iter()
        .filter_map(|name| catalogue.stop(name))
        .map(|stop| stop.coordinates);
    let Some(projector) = SphereProjector::new(
        coordinates,
        settings.width,
        settings.height,
        settings.padding,
    ) else {
        // No bus uses any declared stop; there is nothing to draw.
        return document;
    };

    draw_route_lines(&mut document, catalogue, settings, &projector, &buses);
    draw_bus_labels(&mut document, catalogue, settings, &projector, &buses);
    draw_stop_circles(&mut document, catalogue, settings, &projector, &used_stops);
    draw_stop_labels(&mut document, catalogue, settings, &projector, &used_stops);

    debug!(objects = document.len(), "assembled map document");
    document
}

/// Palette color for the n-th bus drawn. The index wraps modulo palette
/// size and advances only across buses that are actually drawn, so the line
/// and label layers agree on every bus's color.
fn palette_color(settings: &RenderSettings, index: usize) -> Color {
    settings.color_palette[index % settings.color_palette.len()].clone()
}

fn forward_points(catalogue: &Catalogue, projector: &SphereProjector, bus: &Bus) -> Vec<Point> {
    bus.stops
        .iter()
        .filter_map(|name| catalogue.stop(name))
        .map(|stop| projector.project(stop.coordinates))
        .collect()
}

fn draw_route_lines(
    document: &mut svg::Document,
    catalogue: &Catalogue,
    settings: &RenderSettings,
    projector: &SphereProjector,
    buses: &[&Bus],
) {
    let mut drawn = 0;
    for bus in buses {
        if bus.stops.is_empty() {
            continue;
        }
        let mut polyline = svg::Polyline::new()
            .stroke(palette_color(settings, drawn))
            .stroke_width(settings.line_width);
        let forward = forward_points(catalogue, projector, bus);
        for point in &forward {
            polyline = polyline.point(*point);
        }
        if !bus.is_roundtrip {
            // Return pass retraces the route without re-plotting the
            // turnaround stop.
            for point in forward.iter().rev().skip(1) {
                polyline = polyline.point(*point);
            }
        }
        document.add(polyline);
        drawn += 1;
    }
}

fn bus_label(settings: &RenderSettings, position: Point, name: &str) -> svg::Text {
    svg::Text::new()
        .position(position)
        .offset(settings.bus_label_offset)
        .font_size(settings.stop_label_font_size)
        .font_family(LABEL_FONT_FAMILY)
        .font_weight("bold")
        .content(name)
}

fn draw_bus_labels(
    document: &mut svg::Document,
    catalogue: &Catalogue,
    settings: &RenderSettings,
    projector: &SphereProjector,
    buses: &[&Bus],
) {
    let mut drawn = 0;
    for bus in buses {
        if bus.stops.is_empty() {
            continue;
        }
        let color = palette_color(settings, drawn);
        drawn += 1;

        let first = bus.stops.iter().find_map(|name| catalogue.stop(name));
        let Some(first) = first else {
            continue;
        };
        let mut anchors: Vec<&Stop> = vec![first];
        if !bus.is_roundtrip {
            let last = bus.stops.iter().rev().find_map(|name| catalogue.stop(name));
            if let Some(last) = last {
                if last.name != first.name {
                    anchors.push(last);
                }
            }
        }

        for stop in anchors {
            let position = projector.project(stop.coordinates);
            document.add(
                bus_label(settings, position, &bus.name)
                    .fill(settings.underlayer_color.clone())
                    .stroke(settings.underlayer_color.clone(), settings.underlayer_width),
            );
            document.add(bus_label(settings, position, &bus.name).fill(color.clone()));
        }
    }
}

fn draw_stop_circles(
    document: &mut svg::Document,
    catalogue: &Catalogue,
    settings: &RenderSettings,
    projector: &SphereProjector,
    used_stops: &BTreeSet<&str>,
) {
    for &name in used_stops {
        let Some(stop) = catalogue.stop(name) else {
            continue;
        };
        document.add(
            svg::Circle::new()
                .center(projector.project(stop.coordinates))
                .radius(settings.stop_radius),
        );
    }
}

fn stop_label(settings: &RenderSettings, position: Point, name: &str) -> svg::Text {
    svg::Text::new()
        .position(position)
        .offset(settings.stop_label_offset)
        .font_size(settings.stop_label_font_size)
        .font_family(LABEL_FONT_FAMILY)
        .content(name)
}

fn draw_stop_labels(
    document: &mut svg::Document,
    catalogue: &Catalogue,
    settings: &RenderSettings,
    projector: &SphereProjector,
    used_stops: &BTreeSet<&str>,
) {
    for &name in used_stops {
        let Some(stop) = catalogue.stop(name) else {
            continue;
        };
        let position = projector.project(stop.coordinates);
        document.add(
            stop_label(settings, position, name)
                .fill(settings.underlayer_color.clone())
                .stroke(settings.underlayer_color.clone(), settings.underlayer_width),
        );
        document.add(stop_label(settings, position, name).fill(Color::named("black")));
    }
}
