// ff-core/src/units.rs

use uom::si::f64::{
    ElectricCurrent as UomElectricCurrent, ElectricPotential as UomElectricPotential,
    ElectricalResistance as UomElectricalResistance, Frequency as UomFrequency,
    Length as UomLength, Power as UomPower, Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Current = UomElectricCurrent;
pub type Voltage = UomElectricPotential;
pub type Resistance = UomElectricalResistance;
pub type Frequency = UomFrequency;
pub type Length = UomLength;
/// Real or apparent power. Apparent power (VA) is carried with the watt
/// dimension; the distinction lives in field names, not in the type.
pub type Power = UomPower;
pub type Time = UomTime;

#[inline]
pub fn volts(v: f64) -> Voltage {
    use uom::si::electric_potential::volt;
    Voltage::new::<volt>(v)
}

#[inline]
pub fn kv(v: f64) -> Voltage {
    use uom::si::electric_potential::kilovolt;
    Voltage::new::<kilovolt>(v)
}

#[inline]
pub fn amps(v: f64) -> Current {
    use uom::si::electric_current::ampere;
    Current::new::<ampere>(v)
}

/// Kiloamperes. This is the only place fault currents entered in kA become
/// amperes; every caller converting kA input must come through here.
#[inline]
pub fn ka(v: f64) -> Current {
    use uom::si::electric_current::kiloampere;
    Current::new::<kiloampere>(v)
}

#[inline]
pub fn to_ka(c: Current) -> f64 {
    use uom::si::electric_current::kiloampere;
    c.get::<kiloampere>()
}

#[inline]
pub fn ohms(v: f64) -> Resistance {
    use uom::si::electrical_resistance::ohm;
    Resistance::new::<ohm>(v)
}

#[inline]
pub fn hz(v: f64) -> Frequency {
    use uom::si::frequency::hertz;
    Frequency::new::<hertz>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn to_mm(l: Length) -> f64 {
    use uom::si::length::millimeter;
    l.get::<millimeter>()
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn watts(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

/// Apparent power in kVA.
#[inline]
pub fn kva(v: f64) -> Power {
    kw(v)
}

/// Apparent power in MVA.
#[inline]
pub fn mva(v: f64) -> Power {
    use uom::si::power::megawatt;
    Power::new::<megawatt>(v)
}

#[inline]
pub fn to_mva(p: Power) -> f64 {
    use uom::si::power::megawatt;
    p.get::<megawatt>()
}

pub mod constants {
    pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

    /// Mechanical horsepower in watts.
    pub const HP_TO_W: f64 = 745.699_872;

    /// Joules per calorie (thermochemical).
    pub const J_PER_CAL: f64 = 4.184;
}
