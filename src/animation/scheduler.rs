use std::borrow::Cow;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::animation::easing::AnimationCurve;
use crate::scene::ViewKey;
use crate::scene::view::Rect;

new_key_type! {
    /// Completion token returned by [`AnimationScheduler::schedule`].
    pub struct AnimationHandle;
}

/// Anything that stores view frames an animation can drive.
pub trait AnimationTarget {
    fn frame(&self, view: ViewKey) -> Option<Rect>;

    /// Returns `false` when the view no longer exists.
    fn set_frame(&mut self, view: ViewKey, frame: Rect) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    pub tag: Cow<'static, str>,
    /// Seconds.
    pub duration: f32,
    /// Seconds between commit and the first interpolated frame.
    pub delay: f32,
    pub curve: AnimationCurve,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tag: Cow::Borrowed(""),
            duration: 0.25,
            delay: 0.0,
            curve: AnimationCurve::Linear,
        }
    }
}

/// Reported once per handle, on the tick its animation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub handle: AnimationHandle,
    /// `false` when the animation was cancelled before reaching its end frame.
    pub finished: bool,
}

#[derive(Debug, Clone)]
struct FrameAnimation {
    config: AnimationConfig,
    target: ViewKey,
    from: Rect,
    to: Rect,
    elapsed: f32,
    cancelled: bool,
}

impl FrameAnimation {
    fn progress(&self) -> f32 {
        let active = self.elapsed - self.config.delay;
        if active < 0.0 {
            return 0.0;
        }
        if self.config.duration <= 0.0 {
            return 1.0;
        }
        (active / self.config.duration).min(1.0)
    }
}

/// Tick-driven frame animations.
///
/// Every scheduled animation completes exactly once: either when its clock
/// passes `delay + duration`, or on the tick after it was cancelled.
#[derive(Debug)]
pub struct AnimationScheduler {
    animations: SlotMap<AnimationHandle, FrameAnimation>,
    enabled: bool,
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
            enabled: true,
        }
    }

    /// Commits an animation of `target` from `from` to `to`.
    ///
    /// The target is not touched until the first [`update`](Self::update).
    pub fn schedule(
        &mut self,
        target: ViewKey,
        from: Rect,
        to: Rect,
        config: AnimationConfig,
    ) -> AnimationHandle {
        let elapsed = if self.enabled {
            0.0
        } else {
            config.delay + config.duration
        };
        log::trace!(
            "Animation '{}' scheduled: {:.3}s after {:.3}s delay",
            config.tag,
            config.duration,
            config.delay
        );
        self.animations.insert(FrameAnimation {
            config,
            target,
            from,
            to,
            elapsed,
            cancelled: false,
        })
    }

    /// Advances every clock by `dt` seconds and writes the interpolated frames.
    ///
    /// Returns the animations that ended during this tick.
    pub fn update(&mut self, dt: f32, target: &mut dyn AnimationTarget) -> SmallVec<[Completion; 4]> {
        let mut completed: SmallVec<[Completion; 4]> = SmallVec::new();

        for (handle, anim) in &mut self.animations {
            if anim.cancelled {
                completed.push(Completion {
                    handle,
                    finished: false,
                });
                continue;
            }

            anim.elapsed += dt;
            if anim.elapsed < anim.config.delay {
                continue;
            }

            let t = anim.progress();
            let frame = anim.from.lerp(anim.to, anim.config.curve.apply(t));
            target.set_frame(anim.target, frame);

            if t >= 1.0 {
                completed.push(Completion {
                    handle,
                    finished: true,
                });
            }
        }

        for completion in &completed {
            self.animations.remove(completion.handle);
        }
        completed
    }

    /// Stops an animation where it is. Its completion is still reported on the next tick.
    pub fn cancel(&mut self, handle: AnimationHandle) -> bool {
        match self.animations.get_mut(handle) {
            Some(anim) => {
                anim.cancelled = true;
                true
            }
            None => false,
        }
    }

    /// Cancels every animation committed with `tag`. Returns how many were hit.
    pub fn remove_animations(&mut self, tag: &str) -> usize {
        let mut count = 0;
        for anim in self.animations.values_mut() {
            if anim.config.tag == tag && !anim.cancelled {
                anim.cancelled = true;
                count += 1;
            }
        }
        count
    }

    /// When disabled, new animations jump to their end frame on the next tick.
    pub fn set_animations_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn are_animations_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn is_animating(&self, view: ViewKey) -> bool {
        self.animations
            .values()
            .any(|anim| anim.target == view && !anim.cancelled)
    }

    #[must_use]
    pub fn contains(&self, handle: AnimationHandle) -> bool {
        self.animations.contains_key(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}
