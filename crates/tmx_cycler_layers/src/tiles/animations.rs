//! Tile animation component and update system.

use bevy::prelude::*;
use bevy_ecs_tilemap::prelude::*;

/// Global multiplier applied to tile animation playback.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpeed(pub f32);

impl Default for AnimationSpeed {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Component attached to animated tiles.
///
/// Contains the animation sequence and current playback state.
#[derive(Component, Debug, Clone)]
pub struct TileAnimation {
    /// Sequence of animation frames, never empty.
    frames: Vec<AnimationFrame>,
    /// Current frame index (`0..frames.len()`).
    current_frame: usize,
    /// Time elapsed in current frame (milliseconds).
    elapsed_ms: f32,
}

impl TileAnimation {
    /// Create a tile animation from frame data. Returns `None` without frames.
    pub fn new(frames: Vec<AnimationFrame>) -> Option<Self> {
        if frames.is_empty() {
            return None;
        }
        Some(Self {
            frames,
            current_frame: 0,
            elapsed_ms: 0.0,
        })
    }

    /// Build from `(tile id, duration ms)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, u32)>) -> Option<Self> {
        Self::new(
            pairs
                .into_iter()
                .map(|(tile_id, duration_ms)| AnimationFrame {
                    tile_id,
                    duration_ms,
                })
                .collect(),
        )
    }

    /// Get the current frame's tile ID.
    pub fn current_tile_id(&self) -> u32 {
        self.frames[self.current_frame].tile_id
    }

    // Zero-length frames count as 1 ms.
    fn frame_duration_ms(&self, frame: usize) -> f32 {
        self.frames[frame].duration_ms.max(1) as f32
    }

    fn cycle_ms(&self) -> f32 {
        (0..self.frames.len()).map(|f| self.frame_duration_ms(f)).sum()
    }

    /// Advance playback by `delta_ms`. Returns true if the frame changed.
    pub fn advance(&mut self, delta_ms: f32) -> bool {
        let start = self.current_frame;
        self.elapsed_ms += delta_ms.max(0.0);

        let cycle = self.cycle_ms();
        if self.elapsed_ms >= cycle {
            self.elapsed_ms %= cycle;
        }

        while self.elapsed_ms >= self.frame_duration_ms(self.current_frame) {
            self.elapsed_ms -= self.frame_duration_ms(self.current_frame);
            self.current_frame = (self.current_frame + 1) % self.frames.len();
        }

        self.current_frame != start
    }
}

/// A single frame in a tile animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFrame {
    /// The tile ID to display for this frame.
    pub tile_id: u32,
    /// How long to display this frame (milliseconds).
    pub duration_ms: u32,
}

/// System that updates all animated tiles.
///
/// Advances animation frames based on elapsed time and updates `TileTextureIndex`.
pub fn update_tile_animations(
    time: Res<Time>,
    speed: Res<AnimationSpeed>,
    mut animated_tiles: Query<(&mut TileAnimation, &mut TileTextureIndex)>,
) {
    let delta_ms = time.delta_secs() * 1000.0 * speed.0;
    if delta_ms <= 0.0 {
        return;
    }

    for (mut animation, mut texture_index) in &mut animated_tiles {
        if animation.advance(delta_ms) {
            texture_index.0 = animation.current_tile_id();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> TileAnimation {
        TileAnimation::from_pairs([(4, 400), (5, 400)]).expect("frames")
    }

    #[test]
    fn empty_animation_is_rejected() {
        assert!(TileAnimation::new(Vec::new()).is_none());
    }

    #[test]
    fn frames_change_after_their_duration() {
        let mut anim = water();
        assert!(!anim.advance(399.0));
        assert_eq!(anim.current_tile_id(), 4);
        assert!(anim.advance(1.0));
        assert_eq!(anim.current_tile_id(), 5);
        assert!(anim.advance(400.0));
        assert_eq!(anim.current_tile_id(), 4);
    }

    #[test]
    fn leftover_time_carries_into_next_frame() {
        let mut anim = water();
        anim.advance(500.0);
        assert_eq!(anim.current_frame, 1);
        // 100 ms already spent in frame 1
        assert!(anim.advance(300.0));
        assert_eq!(anim.current_frame, 0);
    }

    #[test]
    fn huge_steps_wrap_around_the_cycle() {
        let mut anim = water();
        anim.advance(800.0 * 1000.0 + 450.0);
        assert_eq!(anim.current_tile_id(), 5);
    }

    #[test]
    fn zero_duration_frames_terminate() {
        let mut anim = TileAnimation::from_pairs([(1, 0), (2, 0)]).expect("frames");
        anim.advance(3.0);
        assert_eq!(anim.current_tile_id(), 2);
    }

    #[test]
    fn system_updates_texture_index() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(AnimationSpeed(2.0))
            .add_systems(Update, update_tile_animations);

        let tile = app
            .world_mut()
            .spawn((water(), TileTextureIndex(4)))
            .id();

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(std::time::Duration::from_millis(250));
        app.world_mut().run_schedule(Update);

        let index = app.world().get::<TileTextureIndex>(tile).expect("tile");
        assert_eq!(index.0, 5);
    }
}
