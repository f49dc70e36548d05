//! Stat scaling and power curves.
//!
//! Pure integer functions with no randomness; every other module reads
//! derived bonuses through here.

pub mod power;
pub mod scale;

pub use power::{MAX_POWER_LEVEL, PowerCurve, PowerKind, PowerLevels, isqrt};
pub use scale::{
    AVERAGE_STAT_INDEX, HIGH_STAT_INDEX, LOW_STAT_INDEX, adj_con_fix, adj_con_mhp, adj_dex_dis,
    adj_dex_safe, adj_dex_ta, adj_dex_th, adj_int_dev, adj_int_dis, adj_mag_mana, adj_mag_study,
    adj_stat_blow, adj_str_blow, adj_str_dig, adj_str_hold, adj_str_td, adj_str_wgt, adj_wis_sav,
    stat_scale, weight_limit, weight_remaining,
};
