//! Scalar tweens advanced by the frame loop

/// Interpolation curve applied to normalized tween progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    QuadInOut,
}

impl Easing {
    fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// An in-flight interpolation of a single value over a fixed duration
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
    on_update: Option<Box<dyn FnMut(f32)>>,
}

impl Tween {
    /// Tween from `from` to `to` over `duration` seconds
    ///
    /// Non-positive durations complete on the first update.
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing: Easing::default(),
            on_update: None,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Callback invoked with the current value on every advance
    pub fn on_update(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            return self.to;
        }
        let t = self.easing.apply(self.elapsed / self.duration);
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt` seconds; returns whether the tween finished
    fn advance(&mut self, dt: f32) -> bool {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        let value = self.value();
        if let Some(f) = &mut self.on_update {
            f(value);
        }
        self.is_finished()
    }
}

/// The set of running tweens, updated once per frame
#[derive(Default)]
pub struct TweenSet {
    tweens: Vec<Tween>,
}

impl TweenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tween: Tween) {
        self.tweens.push(tween);
    }

    /// Advance every tween, dropping the ones that finished
    pub fn update(&mut self, dt: f32) {
        self.tweens.retain_mut(|tween| !tween.advance(dt));
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn linear_tween_interpolates() {
        let mut tween = Tween::new(0.0, 10.0, 2.0);
        tween.advance(0.5);
        assert_relative_eq!(tween.value(), 2.5);
        tween.advance(0.5);
        assert_relative_eq!(tween.value(), 5.0);
    }

    #[test]
    fn finished_tween_clamps_to_target() {
        let mut tween = Tween::new(1.0, 3.0, 1.0);
        tween.advance(5.0);
        assert!(tween.is_finished());
        assert_relative_eq!(tween.value(), 3.0);
    }

    #[test]
    fn quad_in_out_is_symmetric() {
        let easing = Easing::QuadInOut;
        assert_relative_eq!(easing.apply(0.0), 0.0);
        assert_relative_eq!(easing.apply(0.5), 0.5);
        assert_relative_eq!(easing.apply(1.0), 1.0);
        assert!(easing.apply(0.25) < 0.25);
        assert!(easing.apply(0.75) > 0.75);
    }

    #[test]
    fn set_drops_finished_tweens_and_fires_callbacks() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut set = TweenSet::new();
        set.add(Tween::new(0.0, 1.0, 1.0).on_update(move |v| sink.borrow_mut().push(v)));
        set.add(Tween::new(0.0, 1.0, 10.0));
        set.update(0.5);
        assert_eq!(set.len(), 2);
        set.update(0.5);
        assert_eq!(set.len(), 1);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_relative_eq!(seen[0], 0.5);
        assert_relative_eq!(seen[1], 1.0);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut set = TweenSet::new();
        set.add(Tween::new(0.0, 1.0, 0.0));
        set.update(0.0);
        assert!(set.is_empty());
    }
}
