// Synthetic sensor reading generator
use crate::domain::reading::{Channel, Reading, round1};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

/// Source of per-channel noise. Isolated behind a trait so generation can be
/// made deterministic in tests.
pub trait NoiseSource {
    /// Draw one sample from `[0, bound)`.
    fn sample(&mut self, bound: f64) -> f64;
}

/// Uniform noise backed by a `rand` generator.
#[derive(Debug)]
pub struct UniformNoise<R: Rng>(pub R);

impl<R: Rng> NoiseSource for UniformNoise<R> {
    fn sample(&mut self, bound: f64) -> f64 {
        if bound <= 0.0 {
            return 0.0;
        }
        self.0.random_range(0.0..bound)
    }
}

/// Noise source that always returns zero, for deterministic tests.
#[derive(Debug, Default)]
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn sample(&mut self, _bound: f64) -> f64 {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sin,
    Cos,
}

impl Wave {
    fn eval(self, x: f64) -> f64 {
        match self {
            Wave::Sin => x.sin(),
            Wave::Cos => x.cos(),
        }
    }
}

/// Per-channel shape of the synthetic signal.
#[derive(Debug, Clone, Copy)]
pub struct ChannelProfile {
    pub baseline: f64,
    pub amplitude: f64,
    pub frequency: f64,
    pub wave: Wave,
    pub noise_bound: f64,
}

impl ChannelProfile {
    /// Smallest value the channel can take (noise is non-negative).
    pub fn min_value(&self) -> f64 {
        self.baseline - self.amplitude
    }

    pub fn max_value(&self) -> f64 {
        self.baseline + self.amplitude + self.noise_bound
    }
}

pub fn profile(channel: Channel) -> ChannelProfile {
    let (baseline, amplitude, frequency, wave, noise_bound) = match channel {
        Channel::Temperature => (25.0, 5.0, 0.1, Wave::Sin, 2.0),
        Channel::Humidity => (60.0, 10.0, 0.1, Wave::Cos, 3.0),
        Channel::Ec => (1.2, 0.3, 0.05, Wave::Sin, 0.1),
        Channel::Ph => (6.5, 0.5, 0.08, Wave::Sin, 0.2),
        Channel::N => (0.5, 0.2, 0.12, Wave::Sin, 0.1),
        Channel::P => (0.3, 0.2, 0.15, Wave::Cos, 0.1),
        Channel::K => (0.4, 0.2, 0.1, Wave::Sin, 0.1),
    };
    ChannelProfile {
        baseline,
        amplitude,
        frequency,
        wave,
        noise_bound,
    }
}

/// Produces synthetic readings from deterministic periodic signals plus
/// bounded uniform noise.
#[derive(Debug)]
pub struct SensorSimulator<N: NoiseSource> {
    noise: N,
}

impl SensorSimulator<UniformNoise<StdRng>> {
    pub fn from_os_rng() -> Self {
        Self::new(UniformNoise(StdRng::from_os_rng()))
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(UniformNoise(StdRng::seed_from_u64(seed)))
    }
}

impl<N: NoiseSource> SensorSimulator<N> {
    pub fn new(noise: N) -> Self {
        Self { noise }
    }

    /// Generate one reading for the given instant, all channels rounded to
    /// one decimal digit.
    pub fn generate(&mut self, at: DateTime<Utc>) -> Reading {
        // Fractional minutes since the epoch, folded onto a 1440-minute day.
        let time_index = (at.timestamp_millis() as f64 / 60_000.0) % MINUTES_PER_DAY;

        Reading {
            time: at,
            temperature: self.channel_value(Channel::Temperature, time_index),
            humidity: self.channel_value(Channel::Humidity, time_index),
            ec: self.channel_value(Channel::Ec, time_index),
            ph: self.channel_value(Channel::Ph, time_index),
            n: self.channel_value(Channel::N, time_index),
            p: self.channel_value(Channel::P, time_index),
            k: self.channel_value(Channel::K, time_index),
        }
    }

    /// Generate readings at fixed minute intervals over `[start, end]`,
    /// inclusive of `start` and every subsequent tick that is `<= end`.
    pub fn generate_range(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval_minutes: u32,
    ) -> impl Iterator<Item = Reading> + '_ {
        let step = Duration::minutes(i64::from(interval_minutes.max(1)));
        let ticks = std::iter::successors((start <= end).then_some(start), move |tick| {
            let next = *tick + step;
            (next <= end).then_some(next)
        });
        ticks.map(move |tick| self.generate(tick))
    }

    fn channel_value(&mut self, channel: Channel, time_index: f64) -> f64 {
        let profile = profile(channel);
        let wave = profile.wave.eval(time_index * profile.frequency);
        let noise = self.noise.sample(profile.noise_bound);
        round1(profile.baseline + profile.amplitude * wave + noise)
    }
}
