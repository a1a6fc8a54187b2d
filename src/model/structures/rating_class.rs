use serde_repr::{Deserialize_repr, Serialize_repr};
use std::{convert::TryFrom, fmt};
use strum_macros::EnumIter;

#[derive(Deserialize_repr, Serialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[repr(u8)]
pub enum RatingClass {
    Past = 0,
    Present = 1,
    Future = 2,
    Beyond = 3,
    Eternal = 4
}

impl RatingClass {
    /// The three-letter form used on song select, e.g. `FTR`.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            RatingClass::Past => "PST",
            RatingClass::Present => "PRS",
            RatingClass::Future => "FTR",
            RatingClass::Beyond => "BYD",
            RatingClass::Eternal => "ETR"
        }
    }
}

impl fmt::Display for RatingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RatingClass::Past => "Past",
            RatingClass::Present => "Present",
            RatingClass::Future => "Future",
            RatingClass::Beyond => "Beyond",
            RatingClass::Eternal => "Eternal"
        };
        write!(f, "{}", text)
    }
}

impl TryFrom<i32> for RatingClass {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(RatingClass::Past),
            1 => Ok(RatingClass::Present),
            2 => Ok(RatingClass::Future),
            3 => Ok(RatingClass::Beyond),
            4 => Ok(RatingClass::Eternal),
            _ => Err(())
        }
    }
}
