/*
 *  main.rs
 *
 *  SegMonS - worth the squeeze
 *	(c) 2020-26 Stuart Hunter
 *
 *	Host loop: fast tick, stdin commands, JSON responses
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

use std::time::Duration;
use anyhow::Context;
use log::{info, error, warn};
use env_logger::Env;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tokio::signal::unix::{signal, SignalKind};

use segmons::config;
use segmons::display::{DisplayFunction, DisplayManager};
use segmons::display::components::LocalTime;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Asynchronously waits for a SIGINT, SIGTERM, or SIGHUP signal.
async fn signal_handler() -> anyhow::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

/// Parse and apply one host line, answering with a JSON payload on stdout
fn handle_line(display: &mut DisplayManager, line: &str) {
    let payload = match DisplayFunction::parse_line(line).and_then(|f| display.dispatch(f)) {
        Ok(response) => response.to_payload(),
        Err(e) => {
            if e.is_validation() {
                warn!("rejected '{}': {}", line, e);
            } else {
                error!("'{}' failed: {}", line, e);
            }
            e.to_payload()
        }
    };
    println!("{}", payload);
}

// single execution context: ticks and commands never run concurrently
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load().context("loading configuration")?;

    let level = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    info!("This {} worth the Squeeze", env!("CARGO_PKG_NAME"));
    info!("v.{} built {} ({})", env!("CARGO_PKG_VERSION"), BUILD_DATE, BUILD_PROFILE);

    let settings = cfg.display_settings();
    let mut display = DisplayManager::new(&settings, Box::new(LocalTime))
        .context("creating display")?;
    display.init().context("initializing display")?;

    let mut ticker = tokio::time::interval(Duration::from_millis(settings.tick_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let shutdown = signal_handler();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = display.tick() {
                    error!("tick failed: {}", e);
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) if line.trim().is_empty() => {}
                    Ok(Some(line)) => handle_line(&mut display, &line),
                    Ok(None) => {
                        info!("stdin closed, overlays keep running until a signal");
                        stdin_open = false;
                    }
                    Err(e) => {
                        warn!("stdin read failed: {}", e);
                        stdin_open = false;
                    }
                }
            }
            res = &mut shutdown => {
                if let Err(e) = res {
                    error!("signal handler failed: {}", e);
                }
                break;
            }
        }
    }

    if let Err(e) = display.set_power(false) {
        warn!("failed to blank display on exit: {}", e);
    }
    info!("{} stopped", env!("CARGO_PKG_NAME"));
    Ok(())
}
