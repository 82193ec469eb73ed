//! Systems driving the conversation lifecycle and the background reply
//! channel.
use std::sync::{
    mpsc::{channel, Receiver, Sender},
    Mutex,
};
use std::thread;

use bevy::{
    ecs::message::{MessageReader, MessageWriter},
    prelude::*,
};

use crate::{
    core::settings::GameTuning,
    player::components::PlayerState,
    world::catalog::{NpcId, WorldCatalog},
};

use super::{
    broker::ActiveReplyBroker,
    coordinator::{ActiveConversation, ConversationLog},
    errors::ReplyError,
    events::{ChatClosedEvent, ChatSubmitEvent, NpcEngagedEvent, PlayerSpokeEvent, ReplyArrivedEvent},
};

/// Result of one background reply call.
#[derive(Debug)]
pub struct ReplyOutcome {
    pub npc: NpcId,
    pub result: Result<String, ReplyError>,
}

/// Channel carrying reply outcomes from worker threads back to the frame
/// loop. Workers clone the sender; the receiver is drained once per frame.
#[derive(Resource)]
pub struct ReplyChannel {
    tx: Sender<ReplyOutcome>,
    rx: Mutex<Receiver<ReplyOutcome>>,
}

impl ReplyChannel {
    pub fn sender(&self) -> Sender<ReplyOutcome> {
        self.tx.clone()
    }

    /// Non-blocking drain of everything the workers have delivered.
    pub fn drain(&self) -> Vec<ReplyOutcome> {
        let Ok(rx) = self.rx.lock() else {
            return Vec::new();
        };
        let mut outcomes = Vec::new();
        while let Ok(outcome) = rx.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }
}

impl Default for ReplyChannel {
    fn default() -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx: Mutex::new(rx),
        }
    }
}

/// Opens the conversation panel for an engaged NPC, seeding the greeting on
/// first contact.
pub fn handle_npc_engaged(
    mut events: MessageReader<NpcEngagedEvent>,
    catalog: Res<WorldCatalog>,
    time: Res<Time>,
    mut log: ResMut<ConversationLog>,
    mut active: ResMut<ActiveConversation>,
) {
    for event in events.read() {
        let Some(record) = catalog.npc(event.npc) else {
            warn!("Engage requested for unknown NPC {}", event.npc);
            continue;
        };

        log.engage(record, time.elapsed_secs_f64());
        active.0 = Some(record.id);
        info!("Conversation opened with {} ({})", record.name, record.id);
    }
}

/// Closes the conversation panel. History and any in-flight reply are
/// untouched; a late reply is appended to the hidden history silently.
pub fn handle_chat_closed(
    mut events: MessageReader<ChatClosedEvent>,
    mut active: ResMut<ActiveConversation>,
) {
    if events.read().next().is_some() {
        if let Some(npc) = active.0.take() {
            debug!("Conversation panel closed for {}", npc);
        }
    }
}

/// Starts an exchange for each submitted chat line: appends the player
/// message synchronously, then hands the reply call to a worker thread so
/// the frame loop keeps ticking while the request is in flight.
#[allow(clippy::too_many_arguments)]
pub fn handle_chat_submit(
    mut events: MessageReader<ChatSubmitEvent>,
    active: Res<ActiveConversation>,
    catalog: Res<WorldCatalog>,
    player: Res<PlayerState>,
    tuning: Res<GameTuning>,
    time: Res<Time>,
    broker: Res<ActiveReplyBroker>,
    channel: Res<ReplyChannel>,
    mut log: ResMut<ConversationLog>,
    mut spoke: MessageWriter<PlayerSpokeEvent>,
) {
    for event in events.read() {
        let Some(npc_id) = active.0 else {
            debug!("Chat submitted with no active conversation; dropped");
            continue;
        };
        let Some(record) = catalog.npc(npc_id) else {
            continue;
        };

        let Some(request) = log.begin_exchange(
            record,
            &player.name,
            &event.text,
            time.elapsed_secs_f64(),
            tuning.chat.history_window,
        ) else {
            continue;
        };

        spoke.write(PlayerSpokeEvent {
            text: request.user_message.clone(),
        });

        let worker_broker = broker.0.clone();
        let tx = channel.sender();
        thread::spawn(move || {
            let npc = request.npc;
            let result = worker_broker.generate_reply(&request);
            // The frame loop may be gone on shutdown; nothing to do then.
            let _ = tx.send(ReplyOutcome { npc, result });
        });
    }
}

/// Drains finished reply calls and lands each reply (or its fallback line)
/// in the owning NPC's history.
pub fn poll_reply_outcomes(
    channel: Res<ReplyChannel>,
    catalog: Res<WorldCatalog>,
    time: Res<Time>,
    mut log: ResMut<ConversationLog>,
    mut arrived: MessageWriter<ReplyArrivedEvent>,
) {
    for outcome in channel.drain() {
        let Some(record) = catalog.npc(outcome.npc) else {
            warn!("Reply outcome for unknown NPC {}; dropped", outcome.npc);
            continue;
        };

        log.complete_exchange(
            record.id,
            &record.name,
            outcome.result,
            time.elapsed_secs_f64(),
        );
        arrived.write(ReplyArrivedEvent { npc: record.id });
        info!("Reply landed for {} ({})", record.name, record.id);
    }
}
