//! Conversions between frequencies, note names and
//! [MIDI note numbers](https://www.inspiredacoustics.com/en/MIDI_note_numbers_and_center_frequencies).

use micromath::F32Ext;

/// Note names of the chromatic scale, starting at C.
const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// MIDI note number of A4.
const A4_MIDI_NOTE: i32 = 69;

const SEMITONES_PER_OCTAVE: f32 = 12.0;
const CENTS_PER_SEMITONE: f32 = 100.0;

/// The note nearest to a given frequency, with the deviation from it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NoteInfo {
    /// Note name, e.g `"A"` or `"C#"`.
    pub name: &'static str,
    /// Octave number, e.g 4 for A4.
    pub octave: i32,
    /// Signed deviation from the note in cents. Positive means sharp.
    pub cents: f32,
    /// The frequency of the note itself, in Hz.
    pub frequency: f32,
}

/// Returns the note nearest to `frequency`, relative to the given A4
/// reference frequency (440 Hz for standard tuning). Returns `None` for
/// non-positive or non-finite inputs and for frequencies outside the MIDI
/// note range.
pub fn frequency_to_note(frequency: f32, a4_frequency: f32) -> Option<NoteInfo> {
    if !(frequency > 0.0) || !(a4_frequency > 0.0) {
        return None;
    }
    if !frequency.is_finite() || !a4_frequency.is_finite() {
        return None;
    }

    let semitones_from_a4 = SEMITONES_PER_OCTAVE * F32Ext::log2(frequency / a4_frequency);
    let nearest = F32Ext::round(semitones_from_a4) as i32 + A4_MIDI_NOTE;
    if !(0..=127).contains(&nearest) {
        return None;
    }

    let target = midi_note_to_frequency(nearest, a4_frequency);
    Some(NoteInfo {
        name: NOTE_NAMES[(nearest % 12) as usize],
        octave: nearest / 12 - 1,
        cents: frequency_to_cents(frequency, target),
        frequency: target,
    })
}

/// Returns the frequency of a note given by name and octave, e.g
/// (`"A"`, 4) for A4. Sharp (`#`) and flat (`b`) accidentals are
/// supported. Returns `None` for unknown names and notes outside the MIDI
/// range.
pub fn note_to_frequency(note_name: &str, octave: i32, a4_frequency: f32) -> Option<f32> {
    note_name_to_midi(note_name, octave).map(|midi| midi_note_to_frequency(midi, a4_frequency))
}

/// Returns the frequency of a MIDI note number relative to the given A4
/// reference frequency.
pub fn midi_note_to_frequency(midi_note: i32, a4_frequency: f32) -> f32 {
    let semitones_from_a4 = (midi_note - A4_MIDI_NOTE) as f32;
    a4_frequency * F32Ext::powf(2.0, semitones_from_a4 / SEMITONES_PER_OCTAVE)
}

/// Returns the signed difference between two frequencies in cents,
/// positive when `frequency1` is above `frequency2`. Non-positive inputs
/// yield 0.
pub fn frequency_to_cents(frequency1: f32, frequency2: f32) -> f32 {
    if frequency1 <= 0.0 || frequency2 <= 0.0 {
        return 0.0;
    }
    // The log2 approximation is not exactly zero at a ratio of 1.
    if frequency1 == frequency2 {
        return 0.0;
    }
    SEMITONES_PER_OCTAVE * CENTS_PER_SEMITONE * F32Ext::log2(frequency1 / frequency2)
}

/// Converts a frequency to a MIDI note number with a fractional part,
/// assuming standard tuning (A4 = 440 Hz).
pub fn freq_to_midi_note(frequency: f32) -> f32 {
    (A4_MIDI_NOTE as f32) + SEMITONES_PER_OCTAVE * F32Ext::log2(frequency / 440.0)
}

/// Returns the name of a MIDI note number, or `None` outside the 0-127
/// range.
pub fn midi_note_to_name(midi_note: i32) -> Option<&'static str> {
    if !(0..=127).contains(&midi_note) {
        return None;
    }
    Some(NOTE_NAMES[(midi_note % 12) as usize])
}

/// Returns the MIDI note number of a note given by name and octave, or
/// `None` for unknown names and notes outside the 0-127 range.
pub fn note_name_to_midi(note_name: &str, octave: i32) -> Option<i32> {
    let index = chromatic_index(note_name)?;
    let midi = (octave + 1) * 12 + index;
    if (0..=127).contains(&midi) {
        Some(midi)
    } else {
        None
    }
}

fn chromatic_index(note_name: &str) -> Option<i32> {
    if let Some(index) = NOTE_NAMES.iter().position(|name| *name == note_name) {
        return Some(index as i32);
    }

    // Flat spellings map to the semitone below the natural letter,
    // e.g "Bb" -> "A#".
    if note_name.len() == 2 && note_name.ends_with('b') {
        let letter = &note_name[..1];
        if let Some(index) = NOTE_NAMES.iter().position(|name| *name == letter) {
            return Some(((index as i32) + 11) % 12);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_round_trip() {
        for octave in 0..=9 {
            for name in NOTE_NAMES.iter() {
                let midi = match note_name_to_midi(name, octave) {
                    Some(midi) => midi,
                    None => continue,
                };
                let frequency = note_to_frequency(name, octave, 440.0).unwrap();
                let info = frequency_to_note(frequency, 440.0).unwrap();

                assert_eq!(info.name, *name);
                assert_eq!(info.octave, octave);
                assert_eq!(note_name_to_midi(info.name, info.octave), Some(midi));
                assert!(
                    info.cents.abs() <= 1e-3,
                    "{}{}: cents {} not ~0",
                    name,
                    octave,
                    info.cents
                );
            }
        }
    }

    #[test]
    fn test_standard_tuning_reference() {
        let a4 = note_to_frequency("A", 4, 440.0).unwrap();
        assert!((a4 - 440.0).abs() <= 0.01);

        let info = frequency_to_note(440.0, 440.0).unwrap();
        assert_eq!(info.name, "A");
        assert_eq!(info.octave, 4);
        assert!(info.cents.abs() <= 0.01);
    }

    #[test]
    fn test_guitar_string_notes() {
        // Standard tuning: E2 A2 D3 G3 B3 E4.
        let strings = [("E", 2), ("A", 2), ("D", 3), ("G", 3), ("B", 3), ("E", 4)];
        let expected = [82.41_f32, 110.0, 146.83, 196.0, 246.94, 329.63];
        for ((name, octave), expected) in strings.iter().zip(expected.iter()) {
            let frequency = note_to_frequency(name, *octave, 440.0).unwrap();
            assert!(
                (frequency - expected).abs() <= 0.5,
                "{}{}: {} vs {}",
                name,
                octave,
                frequency,
                expected
            );
        }
    }

    #[test]
    fn test_cent_deviation() {
        // 445 Hz is about 19.6 cents above A4.
        let info = frequency_to_note(445.0, 440.0).unwrap();
        assert_eq!(info.name, "A");
        assert!((info.cents - 19.56).abs() <= 1.0);

        // Positive means sharp, negative means flat.
        assert!(frequency_to_cents(445.0, 440.0) > 0.0);
        assert!(frequency_to_cents(435.0, 440.0) < 0.0);
        assert_eq!(frequency_to_cents(0.0, 440.0), 0.0);
    }

    #[test]
    fn test_flat_spellings() {
        assert_eq!(note_name_to_midi("Bb", 3), note_name_to_midi("A#", 3));
        assert_eq!(note_name_to_midi("Db", 4), note_name_to_midi("C#", 4));
        assert_eq!(note_name_to_midi("Eb", 2), note_name_to_midi("D#", 2));
        assert_eq!(note_name_to_midi("Gb", 5), note_name_to_midi("F#", 5));
    }

    #[test]
    fn test_invalid_note_names() {
        assert_eq!(note_name_to_midi("H", 4), None);
        assert_eq!(note_name_to_midi("", 4), None);
        assert_eq!(note_name_to_midi("A##", 4), None);
    }

    #[test]
    fn test_midi_bounds() {
        assert_eq!(midi_note_to_name(-1), None);
        assert_eq!(midi_note_to_name(128), None);
        assert_eq!(midi_note_to_name(69), Some("A"));
        assert_eq!(note_name_to_midi("C", -1), Some(0));
        assert_eq!(note_name_to_midi("G", 9), Some(127));
        assert_eq!(note_name_to_midi("G#", 9), None);
    }

    #[test]
    fn test_degenerate_frequencies() {
        assert_eq!(frequency_to_note(0.0, 440.0), None);
        assert_eq!(frequency_to_note(-10.0, 440.0), None);
        assert_eq!(frequency_to_note(f32::NAN, 440.0), None);
        assert_eq!(frequency_to_note(f32::INFINITY, 440.0), None);
        assert_eq!(frequency_to_note(440.0, 0.0), None);
    }

    #[test]
    fn test_approximate_midi_note() {
        // The conversion relies on the approximate log2 of the micromath
        // crate. Compare against std's log2 and make sure the difference
        // stays small.
        let max_cent_error = 0.3_f32;
        for i in 20..10000 {
            let f = i as f32;
            let actual = 69.0 + 12.0 * (f / 440.0).log2();
            let approx = freq_to_midi_note(f);
            let delta_cents = 100. * (actual - approx);
            assert!(delta_cents.abs() <= max_cent_error);
        }
    }
}
