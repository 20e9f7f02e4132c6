//! Mission control demo.
//!
//! Renders a launch pad twice: once with a mission control recent enough for
//! the spaceship, once with an outdated one. Each evaluation report is
//! printed as JSON.
//!
//! ```bash
//! RUST_LOG=capscope=debug cargo run --bin mission-control
//! ```

use std::sync::Arc;

use anyhow::Context;
use capscope::render::unit_fn;
use capscope::utilities::logger::init_logging;
use capscope::{
    create_plugin, wrap_with_capability, Element, PluginApi, PluginConfig, Props, Renderer, Unit,
};
use serde_json::json;

fn launch_pad(control_version: &str) -> Element {
    let mission_control = Props::new()
        .with_name("MissionControl")
        .with_version(control_version)
        .with_api(PluginApi::new().with_function("requestLaunch", |args| {
            let ship = args.first().and_then(|v| v.as_str()).unwrap_or("unknown");
            Ok(json!(format!("{ship}: cleared for launch")))
        }));

    let cockpit = unit_fn("Cockpit", |cx| {
        let control = cx.require("MissionControl")?;
        let status = control.call("requestLaunch", &[json!("Spaceship")])?;
        Ok(vec![Element::tag(
            "status",
            vec![Element::text(status.as_str().unwrap_or_default())],
        )])
    });
    let spaceship: Arc<dyn Unit> = wrap_with_capability(
        cockpit,
        PluginConfig::named("Spaceship", "0.0.1").with_dependency("MissionControl", ">=2.0.0"),
    );

    create_plugin(mission_control, vec![Element::unit(spaceship, Props::new())])
}

fn main() -> anyhow::Result<()> {
    init_logging("info,capscope=debug");

    let renderer = Renderer::new();
    for version in ["2.0.1", "1.0.0"] {
        tracing::info!(mission_control = version, "rendering launch pad");
        let evaluation = renderer
            .render(&launch_pad(version))
            .with_context(|| format!("rendering with MissionControl@{version}"))?;
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    }
    Ok(())
}
