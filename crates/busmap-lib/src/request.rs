//! Request orchestration.
//!
//! One document shaped `{ base_requests, render_settings, stat_requests }`
//! drives the whole pipeline: every construction command is applied to the
//! catalogue before any query is answered or anything is rendered, and query
//! responses come back in input order, each carrying its original id.

use tracing::info;

use crate::catalogue::Catalogue;
use crate::error::{Error, Result};
use crate::geo::Coordinates;
use crate::json::{self, Document, Value};
use crate::render::{self, RenderSettings};
use crate::svg::{self, Color, Point};

/// Query kind, tagged `"Stop"` or `"Bus"` in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Bus,
    Stop,
}

/// One statistics query.
#[derive(Debug, Clone)]
pub struct StatRequest {
    pub id: i32,
    pub kind: StatKind,
    pub name: String,
}

/// A fully processed request document: the populated catalogue, the render
/// configuration when present, and the queries awaiting answers.
#[derive(Debug)]
pub struct Session {
    pub catalogue: Catalogue,
    pub render_settings: Option<RenderSettings>,
    pub stat_requests: Vec<StatRequest>,
}

impl Session {
    /// Parse one request document and apply its construction commands.
    pub fn from_input(input: &str) -> Result<Session> {
        let document = Document::parse(input)?;
        Session::from_document(&document)
    }

    pub fn from_document(document: &Document) -> Result<Session> {
        let root = document.root();
        let base_requests = root.get("base_requests")?.as_list()?;

        let mut catalogue = Catalogue::new();
        // Stops first, then buses: road distances and bus stop lists may
        // reference stops declared later in the document.
        for request in base_requests {
            if request.get("type")?.as_str()? == "Stop" {
                apply_stop(&mut catalogue, request)?;
            }
        }
        for request in base_requests {
            match request.get("type")?.as_str()? {
                "Stop" => {}
                "Bus" => apply_bus(&mut catalogue, request)?,
                other => {
                    return Err(Error::UnknownRequestType {
                        kind: other.to_string(),
                    })
                }
            }
        }

        let render_settings = match root.as_map()?.get("render_settings") {
            Some(value) => Some(decode_render_settings(value)?),
            None => None,
        };

        let stat_requests = match root.as_map()?.get("stat_requests") {
            Some(value) => decode_stat_requests(value)?,
            None => Vec::new(),
        };

        info!(
            stops = catalogue.stop_count(),
            buses = catalogue.bus_count(),
            queries = stat_requests.len(),
            "request document processed"
        );

        Ok(Session {
            catalogue,
            render_settings,
            stat_requests,
        })
    }

    /// Answer every statistics query, in input order.
    pub fn answer_stats(&self) -> Value {
        let responses = self
            .stat_requests
            .iter()
            .map(|request| match request.kind {
                StatKind::Bus => self.answer_bus(request),
                StatKind::Stop => self.answer_stop(request),
            })
            .collect();
        Value::List(responses)
    }

    /// Render the schematic map, failing when the document carried no
    /// render settings.
    pub fn render_map(&self) -> Result<svg::Document> {
        let settings = self
            .render_settings
            .as_ref()
            .ok_or(Error::MissingRenderSettings)?;
        Ok(render::render_map(&self.catalogue, settings))
    }

    fn answer_bus(&self, request: &StatRequest) -> Value {
        match self.catalogue.bus_info(&request.name) {
            Some(stats) => {
                let mut response = json::Map::new();
                response.insert("curvature".into(), Value::Float(stats.curvature));
                response.insert("request_id".into(), Value::Int(request.id));
                response.insert("route_length".into(), Value::Float(stats.route_length));
                response.insert("stop_count".into(), Value::Int(stats.stop_count as i32));
                response.insert(
                    "unique_stop_count".into(),
                    Value::Int(stats.unique_stop_count as i32),
                );
                Value::Map(response)
            }
            None => not_found(request.id),
        }
    }

    fn answer_stop(&self, request: &StatRequest) -> Value {
        match self.catalogue.stop_info(&request.name) {
            Some(stats) => {
                let mut response = json::Map::new();
                response.insert(
                    "buses".into(),
                    Value::List(stats.buses.into_iter().map(Value::String).collect()),
                );
                response.insert("request_id".into(), Value::Int(request.id));
                Value::Map(response)
            }
            None => not_found(request.id),
        }
    }
}

fn not_found(id: i32) -> Value {
    let mut response = json::Map::new();
    response.insert("error_message".into(), Value::String("not found".into()));
    response.insert("request_id".into(), Value::Int(id));
    Value::Map(response)
}

fn apply_stop(catalogue: &mut Catalogue, request: &Value) -> Result<()> {
    let name = request.get("name")?.as_str()?;
    let coordinates = Coordinates::new(
        request.get("latitude")?.as_float()?,
        request.get("longitude")?.as_float()?,
    );
    let mut distances = Vec::new();
    if let Some(road_distances) = request.as_map()?.get("road_distances") {
        for (other, meters) in road_distances.as_map()? {
            distances.push((meters.as_float()?, other.clone()));
        }
    }
    catalogue.add_stop(name, coordinates, &distances);
    Ok(())
}

fn apply_bus(catalogue: &mut Catalogue, request: &Value) -> Result<()> {
    let name = request.get("name")?.as_str()?;
    let is_roundtrip = request.get("is_roundtrip")?.as_bool()?;
    let stops = request
        .get("stops")?
        .as_list()?
        .iter()
        .map(|stop| stop.as_str().map(str::to_string))
        .collect::<Result<Vec<_>>>()?;
    catalogue.add_bus(name, is_roundtrip, stops);
    Ok(())
}

fn decode_stat_requests(value: &Value) -> Result<Vec<StatRequest>> {
    value
        .as_list()?
        .iter()
        .map(|request| {
            let kind = match request.get("type")?.as_str()? {
                "Bus" => StatKind::Bus,
                "Stop" => StatKind::Stop,
                other => {
                    return Err(Error::UnknownRequestType {
                        kind: other.to_string(),
                    })
                }
            };
            Ok(StatRequest {
                id: request.get("id")?.as_int()?,
                kind,
                name: request.get("name")?.as_str()?.to_string(),
            })
        })
        .collect()
}

fn decode_render_settings(value: &Value) -> Result<RenderSettings> {
    let palette = value
        .get("color_palette")?
        .as_list()?
        .iter()
        .map(decode_color)
        .collect::<Result<Vec<_>>>()?;
    if palette.is_empty() {
        return Err(Error::EmptyPalette);
    }

    Ok(RenderSettings {
        width: value.get("width")?.as_float()?,
        height: value.get("height")?.as_float()?,
        padding: value.get("padding")?.as_float()?,
        line_width: value.get("line_width")?.as_float()?,
        stop_radius: value.get("stop_radius")?.as_float()?,
        stop_label_font_size: value.get("stop_label_font_size")?.as_float()? as u32,
        stop_label_offset: decode_offset(value.get("stop_label_offset")?)?,
        bus_label_offset: decode_offset(value.get("bus_label_offset")?)?,
        underlayer_color: decode_color(value.get("underlayer_color")?)?,
        underlayer_width: value.get("underlayer_width")?.as_float()?,
        color_palette: palette,
    })
}

fn decode_offset(value: &Value) -> Result<Point> {
    match value.as_list()? {
        [dx, dy] => Ok(Point::new(dx.as_float()?, dy.as_float()?)),
        _ => Err(Error::TypeMismatch {
            expected: "[dx, dy] offset pair",
            found: value.kind(),
        }),
    }
}

/// Decode a color given either as a 3/4-element numeric list or as a plain
/// color string passed through unchanged.
fn decode_color(value: &Value) -> Result<Color> {
    if let Ok(name) = value.as_str() {
        return Ok(Color::named(name));
    }
    match value.as_list()? {
        [r, g, b] => Ok(Color::Rgb(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => Ok(Color::Rgba(
            channel(r)?,
            channel(g)?,
            channel(b)?,
            a.as_float()?,
        )),
        _ => Err(Error::BadColor),
    }
}

fn channel(value: &Value) -> Result<u8> {
    u8::try_from(value.as_int()?).map_err(|_| Error::BadColor)
}
