use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use glam::Vec2;
use log::info;
use rapier2d::na as nalgebra;
use rusted_ledge::engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use rusted_ledge::engine::input::{Action, InputEvent};
use rusted_ledge::engine::physics::{vector, PhysicsWorld, RapierCharacter, SharedWorld, Solid};
use rusted_ledge::game::player::{AnimationPlayer, EffectLog, Player, PlayerData};

/// Simulated display refresh (~60 Hz)
const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// Length of the scripted run
const FRAMES: u32 = 420;

/// Level gravity, strong enough for snappy jumps at the default jump velocity
const GRAVITY: f32 = -40.0;

/// Floor along y = 0 and a block from x = 3 to 5 whose top edge is a grabbable ledge
fn build_level() -> SharedWorld {
    let mut world = PhysicsWorld::with_gravity(vector![0.0, GRAVITY]);

    world.add_solid(Solid::from_corners(Vec2::new(-20.0, -1.0), Vec2::new(20.0, 0.0)));
    world.add_solid(Solid::from_corners(Vec2::new(3.0, 0.0), Vec2::new(5.0, 2.5)));

    world.update_query_pipeline();
    Rc::new(RefCell::new(world))
}

/// Input timeline as (frame, event): run at the block, jump to its ledge and
/// climb it, walk off the far side, then dash back up-left and crouch
fn script() -> Vec<(u32, InputEvent)> {
    vec![
        (10, InputEvent::Move(Vec2::new(1.0, 0.0))),
        (55, InputEvent::press(Action::Jump)),
        (90, InputEvent::release(Action::Jump)),
        (200, InputEvent::Move(Vec2::ZERO)),
        (230, InputEvent::DashAim(Vec2::new(-1.0, 1.0))),
        (232, InputEvent::press(Action::Dash)),
        (250, InputEvent::release(Action::Dash)),
        (330, InputEvent::Move(Vec2::new(0.0, -1.0))),
        (380, InputEvent::Move(Vec2::ZERO)),
    ]
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Ledge...");

    let world = build_level();
    let data = PlayerData::default();
    let character =
        RapierCharacter::spawn(Rc::clone(&world), Vec2::new(-4.0, 0.8), data.stand_size());
    let effects = EffectLog::new();
    let mut player = Player::new(Box::new(character), data, Box::new(effects.clone()))
        .context("failed to create player")?;
    let mut animation = AnimationPlayer::with_player_animations();
    let mut game_loop = GameLoop::new();

    let timeline = script();
    let frame_dt = FRAME_TIME.as_secs_f32();
    let mut last_state = player.state();

    for frame in 0..FRAMES {
        for (_, event) in timeline.iter().filter(|(at, _)| *at == frame) {
            player.handle_input(*event);
        }

        // Physics runs at fixed steps, slowed down while the dash is aimed
        for _ in 0..game_loop.advance(FRAME_TIME) {
            player.fixed_update()?;
            let mut physics = world.borrow_mut();
            physics.set_timestep(FIXED_TIMESTEP * player.time_scale());
            physics.step();
        }

        player.update(frame_dt)?;

        animation.sync(player.animator());
        for event in animation.update(frame_dt * player.time_scale()) {
            player.handle_animation_event(event)?;
        }

        if player.state() != last_state {
            info!(
                "frame {frame}: {last_state:?} -> {:?} at {}",
                player.state(),
                player.character().position()
            );
            last_state = player.state();
        }
    }

    info!(
        "Finished: {} transitions, {} after-images, ended {:?} at {}",
        player.transition_count(),
        effects.len(),
        player.state(),
        player.character().position()
    );

    Ok(())
}
