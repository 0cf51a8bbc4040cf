use busmap_lib::render::{render_map, RenderSettings, SphereProjector};
use busmap_lib::svg::{Color, Point};
use busmap_lib::{Catalogue, Coordinates};

fn settings(palette: Vec<Color>) -> RenderSettings {
    RenderSettings {
        width: 200.0,
        height: 150.0,
        padding: 25.0,
        line_width: 4.0,
        stop_radius: 5.0,
        stop_label_font_size: 20,
        stop_label_offset: Point::new(7.0, -3.0),
        bus_label_offset: Point::new(7.0, 15.0),
        underlayer_color: Color::Rgba(255, 255, 255, 0.85),
        underlayer_width: 3.0,
        color_palette: palette,
    }
}

#[test]
fn projector_fits_the_bounding_box_inside_the_canvas() {
    let points = [
        Coordinates::new(0.0, 0.0),
        Coordinates::new(1.0, 0.0),
        Coordinates::new(0.0, 1.0),
    ];
    let projector =
        SphereProjector::new(points, 200.0, 150.0, 25.0).expect("non-empty coordinate set");

    // lng scale is 150, lat scale is 100; the smaller one wins.
    assert_eq!(
        projector.project(Coordinates::new(1.0, 0.0)),
        Point::new(25.0, 25.0)
    );
    assert_eq!(
        projector.project(Coordinates::new(0.0, 0.0)),
        Point::new(25.0, 125.0)
    );
    assert_eq!(
        projector.project(Coordinates::new(0.0, 1.0)),
        Point::new(125.0, 125.0)
    );
}

#[test]
fn projector_handles_a_degenerate_longitude_span() {
    let points = [Coordinates::new(0.0, 10.0), Coordinates::new(2.0, 10.0)];
    let projector =
        SphereProjector::new(points, 200.0, 150.0, 25.0).expect("non-empty coordinate set");

    // Only the latitude axis constrains the zoom: (150 - 50) / 2 = 50.
    assert_eq!(
        projector.project(Coordinates::new(2.0, 10.0)),
        Point::new(25.0, 25.0)
    );
    assert_eq!(
        projector.project(Coordinates::new(0.0, 10.0)),
        Point::new(25.0, 125.0)
    );
}

#[test]
fn projector_collapses_a_single_point_to_the_padding_corner() {
    let projector = SphereProjector::new([Coordinates::new(42.0, 42.0)], 200.0, 150.0, 25.0)
        .expect("non-empty coordinate set");
    assert_eq!(
        projector.project(Coordinates::new(42.0, 42.0)),
        Point::new(25.0, 25.0)
    );
}

#[test]
fn projector_rejects_an_empty_coordinate_set() {
    assert!(SphereProjector::new(std::iter::empty(), 200.0, 150.0, 25.0).is_none());
}

fn triangle_catalogue() -> Catalogue {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("south", Coordinates::new(0.0, 0.5), &[]);
    catalogue.add_stop("north west", Coordinates::new(1.0, 0.0), &[]);
    catalogue.add_stop("north east", Coordinates::new(1.0, 1.0), &[]);
    catalogue
}

#[test]
fn layers_appear_in_strict_order() {
    let mut catalogue = triangle_catalogue();
    catalogue.add_bus(
        "7",
        true,
        vec!["south".to_string(), "north west".to_string()],
    );
    let rendered = render_map(&catalogue, &settings(vec![Color::named("green")])).to_string();

    let polyline = rendered.find("<polyline").expect("route line present");
    let text = rendered.find("<text").expect("labels present");
    let circle = rendered.find("<circle").expect("stop markers present");
    assert!(polyline < text, "route lines draw before labels");
    assert!(text < circle, "bus labels draw before stop circles");

    let after_circles = &rendered[circle..];
    assert!(
        after_circles.contains("<text"),
        "stop labels draw after circles"
    );
}

#[test]
fn palette_cycles_over_buses_in_name_order() {
    let mut catalogue = triangle_catalogue();
    for name in ["X", "Y", "Z"] {
        catalogue.add_bus(
            name,
            true,
            vec!["south".to_string(), "north east".to_string()],
        );
    }
    let palette = vec![Color::named("red"), Color::named("blue")];
    let rendered = render_map(&catalogue, &settings(palette)).to_string();

    let strokes: Vec<&str> = rendered
        .lines()
        .filter(|line| line.contains("<polyline"))
        .map(|line| {
            if line.contains("stroke=\"red\"") {
                "red"
            } else if line.contains("stroke=\"blue\"") {
                "blue"
            } else {
                "other"
            }
        })
        .collect();
    assert_eq!(strokes, vec!["red", "blue", "red"]);
}

#[test]
fn out_and_back_polyline_drops_the_turnaround_point() {
    let mut catalogue = triangle_catalogue();
    catalogue.add_bus(
        "9",
        false,
        vec![
            "south".to_string(),
            "north west".to_string(),
            "north east".to_string(),
        ],
    );
    let rendered = render_map(&catalogue, &settings(vec![Color::named("green")])).to_string();

    let line = rendered
        .lines()
        .find(|line| line.contains("<polyline"))
        .expect("route line present");
    let points = line
        .split("points=\"")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .expect("points attribute");
    // Five plotted points for three stops: out, back, no doubled turnaround.
    assert_eq!(points.split(' ').count(), 5);
    let coords: Vec<&str> = points.split(' ').collect();
    assert_eq!(coords[0], coords[4], "route returns to its origin");
    assert_eq!(coords[1], coords[3], "return pass retraces the outbound");
}

#[test]
fn bus_labels_mark_both_terminals_of_an_out_and_back_route() {
    let mut catalogue = triangle_catalogue();
    catalogue.add_bus(
        "night bus",
        false,
        vec!["south".to_string(), "north east".to_string()],
    );
    let rendered = render_map(&catalogue, &settings(vec![Color::named("green")])).to_string();

    let label_count = rendered.matches(">night bus</text>").count();
    // Two anchors, two passes each (underlay + fill).
    assert_eq!(label_count, 4);
}

#[test]
fn roundtrip_bus_gets_a_single_label_anchor() {
    let mut catalogue = triangle_catalogue();
    catalogue.add_bus(
        "loop",
        true,
        vec![
            "south".to_string(),
            "north east".to_string(),
            "south".to_string(),
        ],
    );
    let rendered = render_map(&catalogue, &settings(vec![Color::named("green")])).to_string();
    assert_eq!(rendered.matches(">loop</text>").count(), 2);
}

#[test]
fn stops_render_in_lexicographic_order_with_two_pass_labels() {
    let mut catalogue = triangle_catalogue();
    catalogue.add_bus(
        "1",
        true,
        vec![
            "north west".to_string(),
            "south".to_string(),
            "north east".to_string(),
        ],
    );
    let rendered = render_map(&catalogue, &settings(vec![Color::named("green")])).to_string();

    let ne = rendered.find(">north east</text>").expect("label present");
    let nw = rendered.find(">north west</text>").expect("label present");
    let south = rendered.find(">south</text>").expect("label present");
    assert!(ne < nw && nw < south, "stop labels sort by name");

    // Underlay first, then the dark fill, for each stop.
    let ne_section: Vec<&str> = rendered
        .lines()
        .filter(|line| line.contains(">north east</text>"))
        .collect();
    assert_eq!(ne_section.len(), 2);
    assert!(ne_section[0].contains("stroke=\"rgba(255,255,255,0.85)\""));
    assert!(ne_section[1].contains("fill=\"black\""));
    assert!(!ne_section[1].contains("stroke="));
}

#[test]
fn map_is_empty_when_no_bus_uses_a_declared_stop() {
    let mut catalogue = triangle_catalogue();
    catalogue.add_bus("ghost", true, vec!["phantom".to_string()]);
    let document = render_map(&catalogue, &settings(vec![Color::named("green")]));
    assert!(document.is_empty());
}

#[test]
fn color_function_forms_render_as_text() {
    assert_eq!(Color::Rgb(255, 160, 0).to_string(), "rgb(255,160,0)");
    assert_eq!(
        Color::Rgba(255, 255, 255, 0.85).to_string(),
        "rgba(255,255,255,0.85)"
    );
    assert_eq!(Color::named("green").to_string(), "green");
}
