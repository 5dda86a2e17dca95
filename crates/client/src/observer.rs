//! Event log observer: mirrors every bus topic into the tracing log.
use runtime::{ActionEvent, Event, EventBus, SessionEvent, Topic, TurnEvent};
use tokio::sync::broadcast::{Receiver, error::RecvError};
use tokio::task::JoinHandle;

/// Subscribes to every topic and spawns one forwarding task per topic. The
/// tasks end once the bus (and the session owning it) is dropped.
pub fn spawn_event_log(bus: &EventBus) -> Vec<JoinHandle<usize>> {
    bus.subscribe_multiple(&Topic::ALL)
        .into_iter()
        .map(|(topic, receiver)| tokio::spawn(forward(topic, receiver)))
        .collect()
}

/// Returns how many events were logged.
async fn forward(topic: Topic, mut receiver: Receiver<Event>) -> usize {
    let mut seen = 0;
    loop {
        match receiver.recv().await {
            Ok(event) => {
                seen += 1;
                log_event(&event);
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(?topic, skipped, "event log fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
    seen
}

fn log_event(event: &Event) {
    match event {
        Event::Turn(TurnEvent::Started { player, turn }) => {
            tracing::info!(%player, turn, "turn started");
        }
        Event::Turn(TurnEvent::Ended { player, turn }) => {
            tracing::debug!(%player, turn, "turn ended");
        }
        Event::Action(ActionEvent::Applied {
            player,
            nonce,
            result,
        }) => tracing::debug!(%player, nonce, ?result, "action applied"),
        Event::Action(ActionEvent::Rejected { player, code, .. }) => {
            tracing::debug!(%player, code = code.as_str(), "action rejected");
        }
        Event::Session(SessionEvent::GameEnded(result)) => {
            tracing::info!(winner = %result.winner, turns = result.turns, "game ended");
        }
        Event::Session(SessionEvent::ModeChanged(mode)) => {
            tracing::trace!(mode = mode.as_str(), "mode changed");
        }
        Event::Session(other) => tracing::info!(?other, "session event"),
    }
}
