// Player animation: parameters written by the states and a keyframe player
// that turns them into clip playback and callbacks

use std::collections::HashMap;

/// Boolean and float parameters the states publish each frame
#[derive(Debug, Clone, Default)]
pub struct AnimatorParameters {
    bools: HashMap<&'static str, bool>,
    floats: HashMap<&'static str, f32>,
}

impl AnimatorParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bool(&mut self, name: &'static str, value: bool) {
        self.bools.insert(name, value);
    }

    /// Unset parameters read as false
    pub fn get_bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    pub fn set_float(&mut self, name: &'static str, value: f32) {
        self.floats.insert(name, value);
    }

    /// Unset parameters read as 0
    pub fn get_float(&self, name: &str) -> f32 {
        self.floats.get(name).copied().unwrap_or(0.0)
    }

    /// Names of every parameter currently true, sorted
    pub fn active_bools(&self) -> Vec<&'static str> {
        let mut active: Vec<_> = self
            .bools
            .iter()
            .filter(|(_, &on)| on)
            .map(|(&name, _)| name)
            .collect();
        active.sort_unstable();
        active
    }
}

/// Callback authored on a clip frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// Mid-animation cue, forwarded as `animation_trigger`
    Trigger,
    /// End of a one-shot, forwarded as `animation_finish_trigger`
    Finished,
}

/// Frame-based clip, selected by the animator bool of the same name
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: &'static str,
    pub frames: usize,
    pub seconds_per_frame: f32,
    pub repeat: bool,
    pub events: Vec<(usize, AnimationEvent)>,
}

impl AnimationClip {
    fn build(name: &'static str, frames: usize, fps: f32, repeat: bool) -> Self {
        Self {
            name,
            frames: frames.max(1),
            seconds_per_frame: fps.recip(),
            repeat,
            events: Vec::new(),
        }
    }

    pub fn looping(name: &'static str, frames: usize, fps: f32) -> Self {
        Self::build(name, frames, fps, true)
    }

    /// Plays once and holds its last frame
    pub fn once(name: &'static str, frames: usize, fps: f32) -> Self {
        Self::build(name, frames, fps, false)
    }

    pub fn with_event(mut self, frame: usize, event: AnimationEvent) -> Self {
        self.events.push((frame.min(self.last_frame()), event));
        self
    }

    pub fn with_end_event(self, event: AnimationEvent) -> Self {
        let last = self.last_frame();
        self.with_event(last, event)
    }

    pub fn length(&self) -> f32 {
        self.frames as f32 * self.seconds_per_frame
    }

    fn last_frame(&self) -> usize {
        self.frames - 1
    }
}

/// Plays whichever clip the animator parameters select and reports the
/// callbacks authored on the frames it passes through
#[derive(Debug)]
pub struct AnimationPlayer {
    /// Highest selection priority first
    clips: Vec<AnimationClip>,
    active: Option<usize>,
    frame: usize,
    elapsed: f32,
    held: bool,
    speed: f32,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            clips: Vec::new(),
            active: None,
            frame: 0,
            elapsed: 0.0,
            held: false,
            speed: 1.0,
        }
    }

    /// Every clip the player states select, with the callbacks they wait on
    pub fn with_player_animations() -> Self {
        let mut player = Self::new();
        // climbLedge is raised while ledgeClimbState is still set, so it
        // has to outrank the hanging clip
        for (name, frames, fps, event) in [
            ("climbLedge", 8, 16.0, AnimationEvent::Finished),
            ("ledgeClimbState", 4, 16.0, AnimationEvent::Trigger),
            ("land", 3, 20.0, AnimationEvent::Finished),
        ] {
            player.push_clip(AnimationClip::once(name, frames, fps).with_end_event(event));
        }
        for (name, frames, fps) in [
            ("wallClimb", 6, 12.0),
            ("wallGrab", 4, 8.0),
            ("wallSlide", 4, 10.0),
            ("crouchMove", 6, 10.0),
            ("crouchIdle", 4, 8.0),
            ("inAir", 4, 10.0),
            ("move", 8, 12.0),
            ("idle", 8, 10.0),
        ] {
            player.push_clip(AnimationClip::looping(name, frames, fps));
        }
        player.play("idle");
        player
    }

    /// Append at the lowest priority, or replace a clip with the same name in place
    pub fn push_clip(&mut self, clip: AnimationClip) {
        match self.clips.iter().position(|c| c.name == clip.name) {
            Some(index) => self.clips[index] = clip,
            None => self.clips.push(clip),
        }
    }

    /// Start `name` from its first frame unless it is already the active clip.
    /// Returns false for unknown clips.
    pub fn play(&mut self, name: &str) -> bool {
        let Some(index) = self.clips.iter().position(|c| c.name == name) else {
            return false;
        };
        if self.active != Some(index) {
            self.active = Some(index);
            self.frame = 0;
            self.elapsed = 0.0;
            self.held = false;
        }
        true
    }

    /// Switch to the first clip whose bool is set; keep the current one if none is
    pub fn sync(&mut self, params: &AnimatorParameters) {
        if let Some(name) = self.clips.iter().map(|c| c.name).find(|name| params.get_bool(name)) {
            self.play(name);
        }
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    /// Advance by `dt` and collect the events of every frame entered
    pub fn update(&mut self, dt: f32) -> Vec<AnimationEvent> {
        let mut fired = Vec::new();
        let Some(clip) = self.active.and_then(|index| self.clips.get(index)) else {
            return fired;
        };
        if self.held {
            return fired;
        }

        self.elapsed += dt * self.speed;
        while self.elapsed >= clip.seconds_per_frame {
            self.elapsed -= clip.seconds_per_frame;
            self.frame = (self.frame + 1) % clip.frames;

            fired.extend(
                clip.events
                    .iter()
                    .filter(|(at, _)| *at == self.frame)
                    .map(|(_, event)| *event),
            );

            if !clip.repeat && self.frame == clip.last_frame() {
                self.held = true;
                break;
            }
        }
        fired
    }

    pub fn current_animation(&self) -> Option<&str> {
        self.active
            .and_then(|index| self.clips.get(index))
            .map(|clip| clip.name)
    }

    pub fn current_frame(&self) -> usize {
        self.frame
    }

    pub fn is_playing(&self) -> bool {
        self.active.is_some() && !self.held
    }

    /// A one-shot resting on its last frame
    pub fn is_finished(&self) -> bool {
        self.held
    }
}
