//! Fly a Tello through the stock mission plan (or a JSON plan file).
//!
//! Usage:
//!   cargo run --bin fly -- [OPTIONS]
//!
//! Options:
//!   --target <ip:port>   Drone command endpoint (default: 192.168.10.1:8889)
//!   --local-port <port>  Local UDP port for responses (default: 9000)
//!   --timeout <secs>     Receive timeout per attempt (default: 5)
//!   --retries <n>        Send attempts per command (default: 3)
//!   --battery-min <pct>  Battery gate threshold (default: 20)
//!   --plan <file>        JSON flight plan (default: built-in plan)

use std::env;
use std::process;

use tello_link::{CommandLink, FlightPlan, LinkConfig, MissionOutcome, MissionRunner, UdpLink};

struct Args {
    config: LinkConfig,
    plan_file: Option<String>,
}

fn parse_args() -> Args {
    let mut args = Args {
        config: LinkConfig::default(),
        plan_file: None,
    };

    let raw: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "--target" => {
                i += 1;
                args.config.target_addr = match raw.get(i).map(|s| s.parse()) {
                    Some(Ok(addr)) => addr,
                    _ => {
                        eprintln!("Error: --target requires an ip:port value");
                        process::exit(1);
                    }
                };
            }
            "--local-port" => {
                i += 1;
                args.config.local_port = parse_num_arg(&raw, i, "local-port");
            }
            "--timeout" => {
                i += 1;
                let secs: f64 = parse_num_arg(&raw, i, "timeout");
                args.config.timeout_ms = match timeout_ms_from_secs(secs) {
                    Some(ms) => ms,
                    None => {
                        eprintln!("Error: timeout must be between 0 and 3600 seconds");
                        process::exit(1);
                    }
                };
            }
            "--retries" => {
                i += 1;
                args.config.max_retries = parse_num_arg(&raw, i, "retries");
            }
            "--battery-min" => {
                i += 1;
                args.config.battery_min_percent = parse_num_arg(&raw, i, "battery-min");
            }
            "--plan" => {
                i += 1;
                match raw.get(i) {
                    Some(path) => args.plan_file = Some(path.clone()),
                    None => {
                        eprintln!("Error: --plan requires a file path");
                        process::exit(1);
                    }
                }
            }
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if args.config.max_retries == 0 {
        eprintln!("Error: retries must be at least 1");
        process::exit(1);
    }

    args
}

fn parse_num_arg<N: std::str::FromStr>(raw: &[String], i: usize, name: &str) -> N {
    match raw.get(i).map(|s| s.parse()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("Error: --{name} requires a numeric value");
            process::exit(1);
        }
    }
}

/// Convert a `--timeout` value to milliseconds, rejecting values the
/// receive deadline cannot meaningfully hold (non-finite, non-positive, or
/// over an hour).
fn timeout_ms_from_secs(secs: f64) -> Option<u32> {
    if secs.is_finite() && secs > 0.0 && secs <= 3600.0 {
        Some((secs * 1000.0).round() as u32)
    } else {
        None
    }
}

fn print_usage() {
    eprintln!("Usage: fly [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --target <ip:port>   Drone command endpoint (default: 192.168.10.1:8889)");
    eprintln!("  --local-port <port>  Local UDP port for responses (default: 9000)");
    eprintln!("  --timeout <secs>     Receive timeout per attempt (default: 5)");
    eprintln!("  --retries <n>        Send attempts per command (default: 3)");
    eprintln!("  --battery-min <pct>  Battery gate threshold (default: 20)");
    eprintln!("  --plan <file>        JSON flight plan (default: built-in plan)");
}

fn load_plan(args: &Args) -> FlightPlan {
    match &args.plan_file {
        Some(path) => {
            let json = match std::fs::read_to_string(path) {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("Error: cannot read plan file '{path}': {e}");
                    process::exit(1);
                }
            };
            match FlightPlan::from_json(&json) {
                Ok(plan) => plan,
                Err(e) => {
                    eprintln!("Error: invalid plan file '{path}': {e}");
                    process::exit(1);
                }
            }
        }
        None => FlightPlan::standard(args.config.battery_min_percent),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    let plan = load_plan(&args);

    let transport = match UdpLink::bind(&args.config).await {
        Ok(link) => link,
        Err(e) => {
            eprintln!("Error: failed to bind UDP endpoint: {e}");
            process::exit(1);
        }
    };

    let link = CommandLink::new(transport, &args.config);
    let outcome = MissionRunner::new(link).run(&plan).await;

    match outcome {
        MissionOutcome::Completed => {
            println!("Landing completed");
        }
        MissionOutcome::AbortedLowBattery => {
            eprintln!("Aborted: battery below {}%", args.config.battery_min_percent);
            process::exit(2);
        }
        MissionOutcome::Failed(reason) => {
            eprintln!("Error: {reason}");
            process::exit(1);
        }
    }
}
