use countdown::AxisSampler;
use microbit::hal::{
    gpio::{p0::P0_04, Floating, Input},
    saadc::Saadc,
};

/// Joystick X axis wired to edge pin P2 (AIN2).
pub struct SaadcAxis {
    saadc: Saadc,
    pin: P0_04<Input<Floating>>,
}

impl SaadcAxis {
    pub fn new(saadc: Saadc, pin: P0_04<Input<Floating>>) -> Self {
        Self { saadc, pin }
    }
}

impl AxisSampler for SaadcAxis {
    fn sample_raw(&mut self) -> Option<i16> {
        self.saadc.read_channel(&mut self.pin).ok()
    }
}
