//! Headless walkthrough: stack a few transformations on a cube and step the
//! animation at 30 fps, printing where one corner travels.
//!
//! Run with `RUST_LOG=debug` to see the session's state transitions.

use affine_viz::*;

fn main() {
    env_logger::init();

    let mut session = Session::new(SessionConfig::new().animation_duration(1.0));
    session.select_figure(FigureKind::Cube);
    session.on_animation_complete(|vertices| {
        println!("settled: corner 6 at {:?}", vertices[6]);
    });

    let steps = [
        TransformationRequest::scaling(1.5, 1.0, 1.0),
        TransformationRequest::rotation(Axis::Z, 45.0),
        TransformationRequest::translation(0.0, 2.0, 0.0),
    ];

    for request in steps {
        if let Err(e) = session.apply(request) {
            eprintln!("[cube_tour] rejected {:?}: {}", request, e);
            continue;
        }

        let mut frame = 0;
        while session.advance(1.0 / 30.0) == Tick::Frame {
            frame += 1;
            if frame % 10 == 0 {
                println!("  frame {:>2}: corner 6 at {:?}", frame, session.current()[6]);
            }
        }

        println!("{}", display::composition_formula(session.history().requests()));
        println!("{}\n", display::format_matrix(&session.combined_matrix()));
    }

    for delta in display::compare_vertices(session.baseline(), session.current()) {
        let [dx, dy, dz] = delta.format_delta();
        println!(
            "v{} {:?} -> {:?} ({}, {}, {})",
            delta.index, delta.original, delta.current, dx, dy, dz
        );
    }
}
