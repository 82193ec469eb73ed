//! Systems for the conversation panel: keyboard capture and panel rebuild.
use bevy::{
    ecs::message::{MessageReader, MessageWriter},
    input::keyboard::{Key, KeyboardInput},
    prelude::*,
};

use crate::{
    dialogue::{
        coordinator::{ActiveConversation, ConversationLog},
        events::{ChatClosedEvent, ChatSubmitEvent, PlayerSpokeEvent, ReplyArrivedEvent},
    },
    world::catalog::WorldCatalog,
};

use super::components::{ChatInputBuffer, ChatPanelRoot, ChatPanelSettings, ChatPanelTracker};

// Visual constants
const BACKGROUND_COLOR: Color = Color::srgba(0.08, 0.08, 0.12, 0.92);
const BORDER_COLOR: Color = Color::srgb(0.3, 0.3, 0.4);
const NAME_COLOR: Color = Color::srgb(1.0, 0.9, 0.4);
const PLAYER_TEXT_COLOR: Color = Color::srgb(0.6, 0.85, 1.0);
const NPC_TEXT_COLOR: Color = Color::WHITE;
const TYPING_COLOR: Color = Color::srgb(0.6, 0.6, 0.6);
const INPUT_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);

/// Feeds keyboard input into the chat buffer while a conversation is open.
///
/// Enter submits the buffer, Escape closes the panel. While the NPC reply
/// is pending the input line is locked; only Escape still works.
pub fn capture_chat_input(
    mut keys: MessageReader<KeyboardInput>,
    active: Res<ActiveConversation>,
    log: Res<ConversationLog>,
    mut buffer: ResMut<ChatInputBuffer>,
    mut submit: MessageWriter<ChatSubmitEvent>,
    mut closed: MessageWriter<ChatClosedEvent>,
) {
    let Some(npc) = active.0 else {
        if !buffer.text.is_empty() {
            buffer.text.clear();
        }
        keys.clear();
        return;
    };
    let locked = log.is_typing(npc);

    for key in keys.read() {
        if !key.state.is_pressed() {
            continue;
        }

        match &key.logical_key {
            Key::Escape => {
                buffer.text.clear();
                closed.write(ChatClosedEvent);
            }
            _ if locked => {}
            Key::Enter => {
                if !buffer.text.trim().is_empty() {
                    submit.write(ChatSubmitEvent {
                        text: buffer.text.clone(),
                    });
                    buffer.text.clear();
                }
            }
            Key::Backspace => {
                buffer.text.pop();
            }
            Key::Space => {
                buffer.text.push(' ');
            }
            Key::Character(input) => {
                if input.chars().any(|c| c.is_control()) {
                    continue;
                }
                buffer.text.push_str(input.as_str());
            }
            _ => {}
        }
    }
}

/// Rebuilds the panel whenever the conversation state or the input buffer
/// changes. The panel is small enough that tearing it down and respawning
/// is simpler than patching individual text nodes.
#[allow(clippy::too_many_arguments)]
pub fn refresh_chat_panel(
    mut commands: Commands,
    mut tracker: ResMut<ChatPanelTracker>,
    settings: Res<ChatPanelSettings>,
    catalog: Res<WorldCatalog>,
    active: Res<ActiveConversation>,
    log: Res<ConversationLog>,
    buffer: Res<ChatInputBuffer>,
    mut spoke: MessageReader<PlayerSpokeEvent>,
    mut arrived: MessageReader<ReplyArrivedEvent>,
) {
    // Transcript growth is signalled by the dialogue messages; panel
    // open/close and typing come from the resources.
    let transcript_moved = spoke.read().count() + arrived.read().count() > 0;
    if !(active.is_changed() || buffer.is_changed() || transcript_moved) {
        return;
    }

    if let Some(root) = tracker.root.take() {
        commands.entity(root).despawn();
    }

    let Some(npc_id) = active.0 else {
        return;
    };
    let Some(npc) = catalog.npc(npc_id) else {
        return;
    };

    let history = log.history(npc_id);
    let window_start = history.len().saturating_sub(settings.max_visible_lines);
    let typing = log.is_typing(npc_id);

    let panel = commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(settings.bottom_offset),
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                ..default()
            },
            ChatPanelRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        width: Val::Px(settings.panel_width),
                        padding: UiRect::all(Val::Px(settings.padding)),
                        border: UiRect::all(Val::Px(settings.border_width)),
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(4.0),
                        ..default()
                    },
                    BackgroundColor(BACKGROUND_COLOR),
                    BorderColor::from(BORDER_COLOR),
                    // Hit-tested so clicks on the panel never reach the world.
                    Interaction::default(),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new(format!("{} · {}", npc.name, npc.role)),
                        TextFont {
                            font_size: settings.name_font_size,
                            ..default()
                        },
                        TextColor(NAME_COLOR),
                    ));

                    for message in &history[window_start..] {
                        let color = if message.is_player {
                            PLAYER_TEXT_COLOR
                        } else {
                            NPC_TEXT_COLOR
                        };
                        panel.spawn((
                            Text::new(format!("{}: {}", message.sender, message.text)),
                            TextFont {
                                font_size: settings.text_font_size,
                                ..default()
                            },
                            TextColor(color),
                        ));
                    }

                    if typing {
                        panel.spawn((
                            Text::new(format!("{} is typing...", npc.name)),
                            TextFont {
                                font_size: settings.text_font_size,
                                ..default()
                            },
                            TextColor(TYPING_COLOR),
                        ));
                    }

                    let input_line = if typing {
                        "> (waiting for reply)".to_string()
                    } else {
                        format!("> {}_", buffer.text)
                    };
                    panel.spawn((
                        Text::new(input_line),
                        TextFont {
                            font_size: settings.text_font_size,
                            ..default()
                        },
                        TextColor(INPUT_COLOR),
                    ));
                });
        })
        .id();

    tracker.root = Some(panel);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::catalog::NpcId;
    use bevy::input::ButtonState;

    fn press(logical_key: Key) -> KeyboardInput {
        KeyboardInput {
            key_code: bevy::input::keyboard::KeyCode::F35,
            logical_key,
            state: ButtonState::Pressed,
            text: None,
            repeat: false,
            window: Entity::PLACEHOLDER,
        }
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.insert_resource(WorldCatalog::default())
            .init_resource::<ConversationLog>()
            .init_resource::<ActiveConversation>()
            .init_resource::<ChatInputBuffer>()
            .init_resource::<ChatPanelTracker>()
            .insert_resource(ChatPanelSettings::default())
            .add_message::<KeyboardInput>()
            .add_message::<ChatSubmitEvent>()
            .add_message::<ChatClosedEvent>()
            .add_message::<PlayerSpokeEvent>()
            .add_message::<ReplyArrivedEvent>()
            .add_systems(
                Update,
                (capture_chat_input, refresh_chat_panel.after(capture_chat_input)),
            );
        app.world_mut().resource_mut::<ActiveConversation>().0 = Some(NpcId::new(0));
        app
    }

    fn drain_submits(app: &mut App) -> Vec<ChatSubmitEvent> {
        app.world_mut()
            .resource_mut::<bevy::ecs::message::Messages<ChatSubmitEvent>>()
            .drain()
            .collect()
    }

    #[test]
    fn characters_accumulate_in_the_buffer() {
        let mut app = test_app();
        app.world_mut().write_message(press(Key::Character("h".into())));
        app.world_mut().write_message(press(Key::Character("i".into())));
        app.update();

        assert_eq!(app.world().resource::<ChatInputBuffer>().text, "hi");
    }

    #[test]
    fn enter_submits_and_clears_the_buffer() {
        let mut app = test_app();
        app.world_mut().resource_mut::<ChatInputBuffer>().text = "hello".to_string();
        app.world_mut().write_message(press(Key::Enter));
        app.update();

        let submits = drain_submits(&mut app);
        assert_eq!(submits.len(), 1);
        assert_eq!(submits[0].text, "hello");
        assert!(app.world().resource::<ChatInputBuffer>().text.is_empty());
    }

    #[test]
    fn enter_with_blank_buffer_submits_nothing() {
        let mut app = test_app();
        app.world_mut().resource_mut::<ChatInputBuffer>().text = "   ".to_string();
        app.world_mut().write_message(press(Key::Enter));
        app.update();

        assert!(drain_submits(&mut app).is_empty());
    }

    #[test]
    fn input_is_locked_while_reply_is_pending() {
        let mut app = test_app();
        {
            let catalog = app.world().resource::<WorldCatalog>();
            let melisa = catalog.npc(NpcId::new(0)).cloned().unwrap();
            let mut log = app.world_mut().resource_mut::<ConversationLog>();
            log.engage(&melisa, 1.0);
            log.begin_exchange(&melisa, "Alex", "hi", 2.0, 6);
        }

        app.world_mut().write_message(press(Key::Character("x".into())));
        app.world_mut().write_message(press(Key::Enter));
        app.update();

        assert!(app.world().resource::<ChatInputBuffer>().text.is_empty());
        assert!(drain_submits(&mut app).is_empty());
    }

    #[test]
    fn escape_closes_even_while_reply_is_pending() {
        let mut app = test_app();
        {
            let catalog = app.world().resource::<WorldCatalog>();
            let melisa = catalog.npc(NpcId::new(0)).cloned().unwrap();
            let mut log = app.world_mut().resource_mut::<ConversationLog>();
            log.engage(&melisa, 1.0);
            log.begin_exchange(&melisa, "Alex", "hi", 2.0, 6);
        }

        app.world_mut().write_message(press(Key::Escape));
        app.update();

        let closed: Vec<ChatClosedEvent> = app
            .world_mut()
            .resource_mut::<bevy::ecs::message::Messages<ChatClosedEvent>>()
            .drain()
            .collect();
        assert_eq!(closed.len(), 1);
    }

    #[test]
    fn reply_arrival_rebuilds_the_panel() {
        let mut app = test_app();
        app.update();
        let before = app
            .world()
            .resource::<ChatPanelTracker>()
            .root
            .expect("panel open");

        // A frame with nothing new leaves the panel alone.
        app.update();
        assert_eq!(app.world().resource::<ChatPanelTracker>().root, Some(before));

        {
            let catalog = app.world().resource::<WorldCatalog>();
            let melisa = catalog.npc(NpcId::new(0)).cloned().unwrap();
            let mut log = app.world_mut().resource_mut::<ConversationLog>();
            log.engage(&melisa, 1.0);
            log.begin_exchange(&melisa, "Alex", "hi", 2.0, 6);
            log.complete_exchange(melisa.id, &melisa.name, Ok("Hello!".to_string()), 3.0);
        }
        app.world_mut()
            .write_message(ReplyArrivedEvent { npc: NpcId::new(0) });
        app.update();

        let after = app
            .world()
            .resource::<ChatPanelTracker>()
            .root
            .expect("panel still open");
        assert_ne!(after, before, "arrival must rebuild the panel");
    }

    #[test]
    fn panel_spawns_while_engaged_and_despawns_on_close() {
        let mut app = test_app();
        app.update();
        assert!(app.world().resource::<ChatPanelTracker>().root.is_some());

        app.world_mut().resource_mut::<ActiveConversation>().0 = None;
        app.update();
        assert!(app.world().resource::<ChatPanelTracker>().root.is_none());
        assert_eq!(
            app.world_mut()
                .query::<&ChatPanelRoot>()
                .iter(app.world())
                .count(),
            0
        );
    }
}
