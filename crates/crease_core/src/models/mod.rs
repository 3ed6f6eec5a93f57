pub mod ball;
pub mod innings;

pub use ball::{BallEvent, DismissalKind, Extras, PlayerId, WicketRecord};
pub use innings::{
    BattingFigures, BowlingFigures, DeliveryKind, DeliveryRecord, FallOfWicket, InningsSnapshot,
    InningsStatus, LastBallSummary, OverRecord, Partnership, PartnershipRecord, PartnershipShare,
    ProgressPoint,
};
