mod game_vm;
mod mosaic_vm;
mod prediction_vm;
mod time_fmt;

pub use game_vm::{
    FlashVm, HudVm, ResultRowVm, ResultVm, RoundResultVm, StartVm, URGENT_MS, locale_label,
    map_hud, map_result, map_round_result, map_start,
};
pub use mosaic_vm::{MOSAIC_BOX, MosaicVm, mosaic_data_uri, png_data_uri};
pub use prediction_vm::{CandidateVm, map_candidates};
