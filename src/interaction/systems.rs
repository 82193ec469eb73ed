//! Systems translating pointer input into simulation intents.
use bevy::{
    ecs::message::{MessageReader, MessageWriter},
    prelude::*,
    window::PrimaryWindow,
};

use crate::{
    core::settings::GameTuning,
    dialogue::{
        coordinator::ActiveConversation,
        events::{ChatClosedEvent, NpcEngagedEvent},
    },
    interaction::{
        events::WorldClickEvent,
        resolver::{resolve_click, ClickIntent},
    },
    player::components::PlayerState,
    world::{camera::CameraState, catalog::WorldCatalog},
};

/// Turns left clicks into world-coordinate click events. The cursor
/// position and the camera offset share the same top-left, y-down
/// convention, so the translation is a plain offset add.
pub fn emit_world_clicks(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera: Res<CameraState>,
    ui_hits: Query<&Interaction>,
    mut clicks: MessageWriter<WorldClickEvent>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }

    // A click landing on a UI node (the chat panel) is not a world click.
    if ui_hits.iter().any(|hit| *hit != Interaction::None) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    clicks.write(WorldClickEvent {
        point: cursor + camera.offset,
    });
}

/// Resolves click events against the NPC registry and applies the result:
/// a new walk target, plus either an engagement or a panel close.
pub fn apply_click_intents(
    mut clicks: MessageReader<WorldClickEvent>,
    catalog: Res<WorldCatalog>,
    tuning: Res<GameTuning>,
    active: Res<ActiveConversation>,
    mut player: ResMut<PlayerState>,
    mut engaged: MessageWriter<NpcEngagedEvent>,
    mut closed: MessageWriter<ChatClosedEvent>,
) {
    for click in clicks.read() {
        match resolve_click(
            click.point,
            &catalog.npcs,
            player.position,
            &tuning.interaction,
        ) {
            ClickIntent::EngageNpc { npc, stand_point } => {
                player.set_target(stand_point);
                // The panel opens right away; the avatar walks over while
                // the greeting is already on screen.
                engaged.write(NpcEngagedEvent { npc });
            }
            ClickIntent::MoveTo(point) => {
                player.set_target(point);
                if active.0.is_some() {
                    closed.write(ChatClosedEvent);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::coordinator::ConversationLog;
    use crate::dialogue::events::{ChatSubmitEvent, PlayerSpokeEvent, ReplyArrivedEvent};
    use crate::dialogue::systems::{handle_chat_closed, handle_npc_engaged};
    use crate::world::catalog::NpcId;

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(WorldCatalog::default())
            .insert_resource(GameTuning::default())
            .insert_resource(PlayerState::new("Alex", Vec2::new(700.0, 900.0)))
            .init_resource::<ConversationLog>()
            .init_resource::<ActiveConversation>()
            .add_message::<WorldClickEvent>()
            .add_message::<NpcEngagedEvent>()
            .add_message::<ChatClosedEvent>()
            .add_message::<ChatSubmitEvent>()
            .add_message::<PlayerSpokeEvent>()
            .add_message::<ReplyArrivedEvent>()
            .add_systems(
                Update,
                (
                    apply_click_intents,
                    handle_npc_engaged.after(apply_click_intents),
                    handle_chat_closed.after(handle_npc_engaged),
                ),
            );
        app
    }

    fn click_app(cursor: Vec2, offset: Vec2) -> App {
        let mut app = App::new();
        app.init_resource::<ButtonInput<MouseButton>>()
            .insert_resource(CameraState { offset })
            .add_message::<WorldClickEvent>()
            .add_systems(Update, emit_world_clicks);

        let mut window = Window::default();
        window.set_physical_cursor_position(Some(bevy::math::DVec2::new(
            cursor.x as f64,
            cursor.y as f64,
        )));
        app.world_mut().spawn((window, PrimaryWindow));
        app
    }

    fn drain_clicks(app: &mut App) -> Vec<WorldClickEvent> {
        app.world_mut()
            .resource_mut::<bevy::ecs::message::Messages<WorldClickEvent>>()
            .drain()
            .collect()
    }

    #[test]
    fn click_maps_cursor_through_camera_offset() {
        let mut app = click_app(Vec2::new(100.0, 50.0), Vec2::new(10.0, 20.0));
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();

        let clicks = drain_clicks(&mut app);
        assert_eq!(clicks.len(), 1);
        assert_eq!(clicks[0].point, Vec2::new(110.0, 70.0));
    }

    #[test]
    fn click_on_ui_never_reaches_the_world() {
        let mut app = click_app(Vec2::new(100.0, 50.0), Vec2::ZERO);
        // The cursor sits on the open chat panel.
        app.world_mut().spawn(Interaction::Hovered);
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();

        assert!(drain_clicks(&mut app).is_empty());
    }

    #[test]
    fn ground_click_sets_walk_target() {
        let mut app = test_app();
        app.world_mut().write_message(WorldClickEvent {
            point: Vec2::new(100.0, 100.0),
        });
        app.update();

        let player = app.world().resource::<PlayerState>();
        assert_eq!(player.target, Some(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn npc_click_opens_panel_and_walks_to_stand_point() {
        let mut app = test_app();
        // Melisa stands at (550, 520); the player approaches from the right.
        app.world_mut().write_message(WorldClickEvent {
            point: Vec2::new(550.0, 520.0),
        });
        app.update();

        let player = app.world().resource::<PlayerState>();
        assert_eq!(player.target, Some(Vec2::new(600.0, 540.0)));

        // Panel is open before the avatar arrives.
        assert_eq!(
            app.world().resource::<ActiveConversation>().0,
            Some(NpcId::new(0))
        );
        assert_eq!(
            app.world()
                .resource::<ConversationLog>()
                .history(NpcId::new(0))
                .len(),
            1
        );
    }

    #[test]
    fn ground_click_during_conversation_closes_panel() {
        let mut app = test_app();
        app.world_mut()
            .resource_mut::<ActiveConversation>()
            .0 = Some(NpcId::new(0));

        app.world_mut().write_message(WorldClickEvent {
            point: Vec2::new(50.0, 50.0),
        });
        app.update();

        assert_eq!(app.world().resource::<ActiveConversation>().0, None);
        let player = app.world().resource::<PlayerState>();
        assert_eq!(player.target, Some(Vec2::new(50.0, 50.0)));
    }
}
