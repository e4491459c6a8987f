use crate::tui::{TuiActor, TuiMsg};
use shortfact_actors::actor::Addr;
use shortfact_actors::system::ShutdownHandle;
use std::time::Duration;
use tokio::{self, time};

/// Spawn the two feeder tasks the TUI actor needs: a blocking reader for
/// terminal input and a fixed-rate tick for spinner/redraw.
pub fn spawn_tui_feeders(tui: Addr<TuiActor>, shutdown: ShutdownHandle) {
    let tui_in = tui.clone();
    let mut shutdown_input = shutdown.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown_input.recv() => {
                    break;
                }
                ev = tokio::task::spawn_blocking(crossterm::event::read) => {
                    match ev {
                        Ok(Ok(e)) => {
                            let _ = tui_in.send(TuiMsg::InputEvent(e)).await;
                        }
                        Ok(Err(e)) => {
                            tracing::warn!(error = %e, "terminal input read failed");
                        }
                        Err(_) => break,
                    }
                }
            }
        }
    });

    let tui_tick = tui.clone();
    let mut shutdown_tick = shutdown.subscribe();
    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_millis(80));
        loop {
            tokio::select! {
                _ = shutdown_tick.recv() => {
                    break;
                }
                _ = interval.tick() => {
                    let _ = tui_tick.try_send(TuiMsg::Tick);
                }
            }
        }
    });
}
