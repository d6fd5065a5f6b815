//! CLI for inspecting the host bridge.
//!
//! Usage:
//!   hostbridge                         # Default profile
//!   hostbridge --profile ie            # Pick a client profile
//!   hostbridge --config bridge.toml    # Profile and feature overrides from a file

use hostbridge::runner::ds::collection::ElementCollection;
use hostbridge::runner::ds::operations::type_conversion::to_display_string;
use hostbridge::runner::ds::value::JsValue;
use hostbridge::runner::host::dom::ElementObject;
use hostbridge::runner::plugin::config::BridgeConfig;
use hostbridge::runner::plugin::registry::BuiltInRegistry;
use hostbridge::runner::plugin::types::EvalContext;
use hostbridge::runner::profile::{CapabilitySet, FeatureFlag};
use std::env;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut profile: Option<String> = None;
    let mut config_path: Option<String> = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            "-p" | "--profile" if i + 1 < args.len() => {
                profile = Some(args[i + 1].clone());
                i += 2;
            }
            "-c" | "--config" if i + 1 < args.len() => {
                config_path = Some(args[i + 1].clone());
                i += 2;
            }
            _ => {
                print_usage();
                process::exit(1);
            }
        }
    }

    let mut config = match &config_path {
        Some(path) => match BridgeConfig::load(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        },
        None => BridgeConfig::new(),
    };
    if profile.is_some() {
        config.profile = profile;
    }

    init_logging(&config.logging.level);

    let caps = match config.capabilities() {
        Ok(caps) => caps,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    print_capabilities(&caps);
    let registry = BuiltInRegistry::for_capabilities(&caps);
    print_registry(&registry);

    let mut ctx = EvalContext::with_capabilities(caps);
    ctx.install_host_builtins(registry);
    demo_walk(&mut ctx);
}

fn print_usage() {
    eprintln!("hostbridge - scripting-host object bridge");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  hostbridge                       Use the default profile");
    eprintln!("  hostbridge --profile NAME        ie, chrome, edge, ff, ff-esr");
    eprintln!("  hostbridge --config PATH         Load profile and feature overrides");
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_capabilities(caps: &CapabilitySet) {
    println!("profile: {}", caps.profile());
    for flag in FeatureFlag::ALL.iter() {
        let mark = if caps.has_feature(*flag) { "x" } else { " " };
        println!("  [{}] {}", mark, flag);
    }
}

fn print_registry(registry: &BuiltInRegistry) {
    println!("host objects:");
    for name in registry.object_names() {
        let obj = match registry.get_object(name) {
            Some(obj) => obj,
            None => continue,
        };
        let mut members: Vec<String> = obj
            .getters
            .keys()
            .cloned()
            .chain(obj.methods.keys().map(|m| format!("{}()", m)))
            .collect();
        members.sort();
        println!(
            "  {}{} : {} [{}]",
            name,
            if obj.constructor.is_some() { " (new)" } else { "" },
            registry.prototype_chain(name).join(" -> "),
            members.join(", ")
        );
    }
}

fn demo_walk(ctx: &mut EvalContext) {
    let items = ElementCollection::from_values(vec![
        JsValue::Object(ElementObject::new("li").with_attribute("id", "first").into_handle()),
        JsValue::Object(ElementObject::new("li").with_attribute("id", "second").into_handle()),
        JsValue::Object(ElementObject::new("li").with_attribute("id", "third").into_handle()),
    ])
    .into_handle();

    println!("enumerating 3 list items:");
    let cursor = match ctx.construct("Enumerator", vec![JsValue::Object(items.clone())]) {
        Some(Ok(cursor)) => cursor,
        Some(Err(e)) => {
            println!("  {}", e.to_string());
            return;
        }
        None => {
            println!("  Enumerator is not available");
            return;
        }
    };

    loop {
        match ctx.invoke(&cursor, "atEnd", vec![]) {
            Some(Ok(JsValue::Boolean(false))) => {}
            _ => break,
        }
        if let Some(Ok(item)) = ctx.invoke(&cursor, "item", vec![]) {
            let id = ctx.get_property(&item, "ID").unwrap_or(JsValue::Undefined);
            println!("  {} id={}", to_display_string(&item), to_display_string(&id));
        }
        let _ = ctx.invoke(&cursor, "moveNext", vec![]);
    }
}
