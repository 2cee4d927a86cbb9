use embedded_hal::digital::InputPin;

/// The flight controller's buzzer line. Active low: the controller pulls it
/// to ground to request sound, the pull-up holds it high otherwise.
pub struct SignalLine<P> {
    pin: P,
}

impl<P: InputPin> SignalLine<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Samples the line once. A failed read counts as silence.
    pub fn sound_requested(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }
}
