//! The little victory jingle played when a round is completed: four sine
//! notes walking up an E-major-ish arpeggio under a shared master envelope.

pub const SAMPLE_RATE: u32 = 44_100;

// E5, G5, B5, D6.
const NOTES: [f32; 4] = [659.25, 783.99, 987.77, 1174.66];
const NOTE_SPACING: f32 = 0.08;
const NOTE_ATTACK: f32 = 0.01;
const NOTE_LENGTH: f32 = 0.2;
const NOTE_PEAK: f32 = 0.8;
const MASTER_PEAK: f32 = 0.2;
const FLOOR: f32 = 0.0001;
const DURATION: f32 = 0.65;

fn exp_ramp(from: f32, to: f32, t: f32) -> f32 {
    from * (to / from).powf(t.clamp(0.0, 1.0))
}

fn note_envelope(dt: f32) -> f32 {
    if dt < 0.0 || dt >= NOTE_LENGTH {
        0.0
    } else if dt < NOTE_ATTACK {
        NOTE_PEAK * dt / NOTE_ATTACK
    } else {
        exp_ramp(NOTE_PEAK, FLOOR, (dt - NOTE_ATTACK) / (NOTE_LENGTH - NOTE_ATTACK))
    }
}

fn master_envelope(t: f32) -> f32 {
    if t < 0.02 {
        exp_ramp(FLOOR, MASTER_PEAK, t / 0.02)
    } else {
        exp_ramp(MASTER_PEAK, FLOOR, (t - 0.02) / (DURATION - 0.02))
    }
}

/// Render the jingle as mono 16-bit PCM at the given sample rate.
pub fn cheer_samples(sample_rate: u32) -> Vec<i16> {
    let total = (DURATION * sample_rate as f32) as usize;
    let mut out = Vec::with_capacity(total);

    for k in 0..total {
        let t = k as f32 / sample_rate as f32;
        let mut sample = 0.0f32;
        for (i, freq) in NOTES.iter().enumerate() {
            let dt = t - i as f32 * NOTE_SPACING;
            let env = note_envelope(dt);
            if env > 0.0 {
                sample += env * (std::f32::consts::TAU * freq * t).sin();
            }
        }
        let mixed = (sample * master_envelope(t)).clamp(-1.0, 1.0);
        out.push((mixed * f32::from(i16::MAX)) as i16);
    }
    out
}
