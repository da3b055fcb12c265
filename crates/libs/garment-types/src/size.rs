use serde::{Deserialize, Serialize};

/// Inferred or supplied biological sex code used to pick a size factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

/// One of the ten authored garment sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Size {
    XXS,
    XS,
    S,
    M,
    L,
    XL,
    XXL,
    ThreeXL,
    FourXL,
    FiveXL,
}

/// Millimetres represented by one authored coordinate unit (§6.1).
pub const MM_PER_UNIT: f64 = 16.259;

impl Size {
    /// The scalar factor for this size and sex, relative to "L" (§6.1).
    pub fn factor(self, sex: Sex) -> f64 {
        let (male, female) = match self {
            Size::XXS => (0.70, 0.68),
            Size::XS => (0.77, 0.76),
            Size::S => (0.85, 0.84),
            Size::M => (0.92, 0.92),
            Size::L => (1.00, 1.00),
            Size::XL => (1.08, 1.10),
            Size::XXL => (1.17, 1.22),
            Size::ThreeXL => (1.27, 1.34),
            Size::FourXL => (1.39, 1.45),
            Size::FiveXL => (1.51, 1.57),
        };
        match sex {
            Sex::Male => male,
            Sex::Female => female,
        }
    }

    /// The uniform scalar applied to every outline coordinate for this size
    /// and sex (§4.2: `ratio = size_factor[size][sex] * mm_per_unit`).
    pub fn ratio(self, sex: Sex) -> f64 {
        self.factor(sex) * MM_PER_UNIT
    }
}
