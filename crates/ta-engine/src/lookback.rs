//! Lookback calculator.
//!
//! The lookback of a call is the number of leading input samples consumed
//! before its first valid output. It depends on the function, its resolved
//! parameters and the unstable-period table, and is computed by the same
//! `*_lookback` functions the kernels size their output with.

use ta_core::{Result, UnstablePeriods};
use ta_indicators::prelude::*;

use crate::func::FuncId;
use crate::params::ResolvedParams;
use crate::registry;
use crate::signature::FunctionDef;
use crate::unstable;

/// Lookback of `def` for the given parameters and unstable-period table.
#[must_use]
pub fn lookback(def: &FunctionDef, params: &ResolvedParams, unstable: &UnstablePeriods) -> usize {
    let u = unstable;
    match def.id {
        FuncId::HtDcperiod => ht_dcperiod_lookback(u),
        FuncId::HtDcphase => ht_dcphase_lookback(u),
        FuncId::HtPhasor => ht_phasor_lookback(u),
        FuncId::HtSine => ht_sine_lookback(u),
        FuncId::HtTrendmode => ht_trendmode_lookback(u),
        FuncId::HtTrendline => ht_trendline_lookback(u),

        FuncId::Adx => adx_lookback(params.period(0), u),
        FuncId::Adxr => adxr_lookback(params.period(0), u),
        FuncId::Dx => dx_lookback(params.period(0), u),
        FuncId::PlusDi => plus_di_lookback(params.period(0), u),
        FuncId::MinusDi => minus_di_lookback(params.period(0), u),
        FuncId::PlusDm => plus_dm_lookback(params.period(0), u),
        FuncId::MinusDm => minus_dm_lookback(params.period(0), u),

        FuncId::Cmo => cmo_lookback(params.period(0), u),
        FuncId::Rsi => rsi_lookback(params.period(0), u),
        FuncId::Imi => imi_lookback(params.period(0), u),
        FuncId::Mfi => mfi_lookback(params.period(0), u),
        FuncId::Mom => mom_lookback(params.period(0)),
        FuncId::Roc => roc_lookback(params.period(0)),
        FuncId::Macd => macd_lookback(&params.macd(), u),
        FuncId::Stoch => stoch_lookback(&params.stoch(), u),
        FuncId::Stochf => stochf_lookback(&params.stochf(), u),
        FuncId::Stochrsi => stochrsi_lookback(&params.stochrsi(), u),

        FuncId::Bbands => bbands_lookback(&params.bbands(), u),
        FuncId::Dema => dema_lookback(params.period(0), u),
        FuncId::Ema => ema_lookback(params.period(0), u),
        FuncId::Kama => kama_lookback(params.period(0), u),
        FuncId::Ma => ma_lookback(params.period(0), params.ma_type(1), u),
        FuncId::Mama => mama_lookback(u),
        FuncId::Sma => sma_lookback(params.period(0)),
        FuncId::T3 => t3_lookback(params.period(0), u),
        FuncId::Tema => tema_lookback(params.period(0), u),
        FuncId::Trima => trima_lookback(params.period(0)),
        FuncId::Wma => wma_lookback(params.period(0)),

        FuncId::CdlDoji => cdl_doji_lookback(&CandleSettings::default()),
        FuncId::CdlEngulfing => cdl_engulfing_lookback(),
        FuncId::CdlHammer => cdl_hammer_lookback(&CandleSettings::default()),

        FuncId::AvgPrice | FuncId::MedPrice | FuncId::TypPrice | FuncId::WclPrice => {
            price_transform_lookback()
        }

        FuncId::Correl => correl_lookback(params.period(0)),
        FuncId::Stddev => stddev_lookback(params.period(0)),
        FuncId::Var => var_lookback(params.period(0)),

        FuncId::Atr => atr_lookback(params.period(0), u),
        FuncId::Natr => natr_lookback(params.period(0), u),
        FuncId::Trange => trange_lookback(),

        FuncId::Obv => obv_lookback(),
    }
}

/// Lookback of `name` with its default parameters and the current
/// process-wide unstable periods.
///
/// # Errors
///
/// Returns [`TaError::UnknownFunction`](ta_core::TaError::UnknownFunction)
/// if no function has that name.
pub fn default_lookback(name: &str) -> Result<usize> {
    let def = registry::lookup(name)?;
    Ok(lookback(
        def,
        &ResolvedParams::defaults(def),
        &unstable::snapshot(),
    ))
}
