//! Function registry.
//!
//! The catalog is a static table ordered by group, then by name, so listing
//! it is deterministic. Lookups go through a name index built on first use.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use ta_core::{FuncUnstId, PriceField, Result, TaError};

use crate::func::{FuncId, Group};
use crate::signature::{
    FunctionDef, FunctionSignature, InputDef, IntegerRange, OptInputDef, OptInputKind, OutputDef,
    OutputFlag, RealRange,
};

// ============================================================================
// Shared slots
// ============================================================================

const MAX_PERIOD: i32 = 100_000;

const IN_REAL: &[InputDef] = &[InputDef::real("inReal")];
const IN_REAL_PAIR: &[InputDef] = &[InputDef::real("inReal0"), InputDef::real("inReal1")];
const IN_HL: &[InputDef] = &[InputDef::price(
    "inPriceHL",
    &[PriceField::High, PriceField::Low],
)];
const IN_HLC: &[InputDef] = &[InputDef::price(
    "inPriceHLC",
    &[PriceField::High, PriceField::Low, PriceField::Close],
)];
const IN_HLCV: &[InputDef] = &[InputDef::price(
    "inPriceHLCV",
    &[
        PriceField::High,
        PriceField::Low,
        PriceField::Close,
        PriceField::Volume,
    ],
)];
const IN_OHLC: &[InputDef] = &[InputDef::price(
    "inPriceOHLC",
    &[
        PriceField::Open,
        PriceField::High,
        PriceField::Low,
        PriceField::Close,
    ],
)];
const IN_OC: &[InputDef] = &[InputDef::price(
    "inPriceOC",
    &[PriceField::Open, PriceField::Close],
)];
const IN_REAL_VOLUME: &[InputDef] = &[
    InputDef::real("inReal"),
    InputDef::price("inPriceV", &[PriceField::Volume]),
];

const OUT_REAL: &[OutputDef] = &[OutputDef::real("outReal", &[OutputFlag::Line])];
const OUT_TREND_MODE: &[OutputDef] = &[OutputDef::integer("outInteger", &[OutputFlag::Line])];
const OUT_PATTERN: &[OutputDef] = &[OutputDef::integer(
    "outInteger",
    &[OutputFlag::PatternBool],
)];
const OUT_BULL_BEAR: &[OutputDef] = &[OutputDef::integer(
    "outInteger",
    &[OutputFlag::PatternBullBear],
)];
const OUT_FAST_STOCH: &[OutputDef] = &[
    OutputDef::real("outFastK", &[OutputFlag::Line]),
    OutputDef::real("outFastD", &[OutputFlag::Line]),
];

/// Moving-average type entries, in code order.
pub const MA_TYPES: &[(&str, i32)] = &[
    ("SMA", 0),
    ("EMA", 1),
    ("WMA", 2),
    ("DEMA", 3),
    ("TEMA", 4),
    ("TRIMA", 5),
    ("KAMA", 6),
    ("MAMA", 7),
    ("T3", 8),
];

const fn period(
    name: &'static str,
    display_name: &'static str,
    hint: &'static str,
    default_value: f64,
    min: i32,
) -> OptInputDef {
    OptInputDef {
        name,
        display_name,
        default_value,
        hint,
        kind: OptInputKind::IntegerRange(IntegerRange {
            min,
            max: MAX_PERIOD,
            suggested_start: 4,
            suggested_end: 200,
            suggested_increment: 1,
        }),
        flags: &[],
    }
}

const fn time_period(default_value: f64, min: i32) -> OptInputDef {
    period(
        "optInTimePeriod",
        "Time Period",
        "Number of period",
        default_value,
        min,
    )
}

const fn ma_type(name: &'static str, display_name: &'static str, hint: &'static str) -> OptInputDef {
    OptInputDef {
        name,
        display_name,
        default_value: 0.0,
        hint,
        kind: OptInputKind::IntegerList(MA_TYPES),
        flags: &[],
    }
}

const fn real(
    name: &'static str,
    display_name: &'static str,
    hint: &'static str,
    default_value: f64,
    range: RealRange,
) -> OptInputDef {
    OptInputDef {
        name,
        display_name,
        default_value,
        hint,
        kind: OptInputKind::RealRange(range),
        flags: &[],
    }
}

const DEVIATIONS: RealRange = RealRange {
    min: -3.0e37,
    max: 3.0e37,
    precision: 2,
    suggested_start: -2.0,
    suggested_end: 2.0,
    suggested_increment: 0.2,
};

const LIMITS: RealRange = RealRange {
    min: 0.01,
    max: 0.99,
    precision: 2,
    suggested_start: 0.01,
    suggested_end: 0.99,
    suggested_increment: 0.01,
};

const PERIOD_14: &[OptInputDef] = &[time_period(14.0, 2)];
const PERIOD_14_MIN_1: &[OptInputDef] = &[time_period(14.0, 1)];
const PERIOD_30: &[OptInputDef] = &[time_period(30.0, 2)];

const FAST_K: OptInputDef = period(
    "optInFastK_Period",
    "Fast-K Period",
    "Time period for building the Fast-K line",
    5.0,
    1,
);
const FAST_D: OptInputDef = period(
    "optInFastD_Period",
    "Fast-D Period",
    "Smoothing for making the Fast-D line. Usually set to 3",
    3.0,
    1,
);
const FAST_D_MA: OptInputDef = ma_type(
    "optInFastD_MAType",
    "Fast-D MA",
    "Type of Moving Average for Fast-D",
);

// ============================================================================
// Catalog
// ============================================================================

const fn def(
    id: FuncId,
    name: &'static str,
    group: Group,
    hint: &'static str,
    unstable: Option<FuncUnstId>,
    inputs: &'static [InputDef],
    opt_inputs: &'static [OptInputDef],
    outputs: &'static [OutputDef],
) -> FunctionDef {
    FunctionDef {
        id,
        name,
        group,
        hint,
        unstable,
        inputs,
        opt_inputs,
        outputs,
    }
}

static FUNCTIONS: &[FunctionDef] = &[
    // Cycle Indicators
    def(
        FuncId::HtDcperiod,
        "HT_DCPERIOD",
        Group::Cycle,
        "Hilbert Transform - Dominant Cycle Period",
        Some(FuncUnstId::HtDcperiod),
        IN_REAL,
        &[],
        OUT_REAL,
    ),
    def(
        FuncId::HtDcphase,
        "HT_DCPHASE",
        Group::Cycle,
        "Hilbert Transform - Dominant Cycle Phase",
        Some(FuncUnstId::HtDcphase),
        IN_REAL,
        &[],
        OUT_REAL,
    ),
    def(
        FuncId::HtPhasor,
        "HT_PHASOR",
        Group::Cycle,
        "Hilbert Transform - Phasor Components",
        Some(FuncUnstId::HtPhasor),
        IN_REAL,
        &[],
        &[
            OutputDef::real("outInPhase", &[OutputFlag::Line]),
            OutputDef::real("outQuadrature", &[OutputFlag::DashLine]),
        ],
    ),
    def(
        FuncId::HtSine,
        "HT_SINE",
        Group::Cycle,
        "Hilbert Transform - SineWave",
        Some(FuncUnstId::HtSine),
        IN_REAL,
        &[],
        &[
            OutputDef::real("outSine", &[OutputFlag::Line]),
            OutputDef::real("outLeadSine", &[OutputFlag::DashLine]),
        ],
    ),
    def(
        FuncId::HtTrendmode,
        "HT_TRENDMODE",
        Group::Cycle,
        "Hilbert Transform - Trend vs Cycle Mode",
        Some(FuncUnstId::HtTrendmode),
        IN_REAL,
        &[],
        OUT_TREND_MODE,
    ),
    // Momentum Indicators
    def(
        FuncId::Adx,
        "ADX",
        Group::Momentum,
        "Average Directional Movement Index",
        Some(FuncUnstId::Adx),
        IN_HLC,
        PERIOD_14,
        OUT_REAL,
    ),
    def(
        FuncId::Adxr,
        "ADXR",
        Group::Momentum,
        "Average Directional Movement Index Rating",
        Some(FuncUnstId::Adxr),
        IN_HLC,
        PERIOD_14,
        OUT_REAL,
    ),
    def(
        FuncId::Cmo,
        "CMO",
        Group::Momentum,
        "Chande Momentum Oscillator",
        Some(FuncUnstId::Cmo),
        IN_REAL,
        PERIOD_14,
        OUT_REAL,
    ),
    def(
        FuncId::Dx,
        "DX",
        Group::Momentum,
        "Directional Movement Index",
        Some(FuncUnstId::Dx),
        IN_HLC,
        PERIOD_14,
        OUT_REAL,
    ),
    def(
        FuncId::Imi,
        "IMI",
        Group::Momentum,
        "Intraday Momentum Index",
        Some(FuncUnstId::Imi),
        IN_OC,
        PERIOD_14,
        OUT_REAL,
    ),
    def(
        FuncId::Macd,
        "MACD",
        Group::Momentum,
        "Moving Average Convergence/Divergence",
        None,
        IN_REAL,
        &[
            period(
                "optInFastPeriod",
                "Fast Period",
                "Number of period for the fast MA",
                12.0,
                2,
            ),
            period(
                "optInSlowPeriod",
                "Slow Period",
                "Number of period for the slow MA",
                26.0,
                2,
            ),
            period(
                "optInSignalPeriod",
                "Signal Period",
                "Smoothing for the signal line (nb of period)",
                9.0,
                1,
            ),
        ],
        &[
            OutputDef::real("outMACD", &[OutputFlag::Line]),
            OutputDef::real("outMACDSignal", &[OutputFlag::DashLine]),
            OutputDef::real("outMACDHist", &[OutputFlag::Histogram]),
        ],
    ),
    def(
        FuncId::Mfi,
        "MFI",
        Group::Momentum,
        "Money Flow Index",
        Some(FuncUnstId::Mfi),
        IN_HLCV,
        PERIOD_14,
        OUT_REAL,
    ),
    def(
        FuncId::MinusDi,
        "MINUS_DI",
        Group::Momentum,
        "Minus Directional Indicator",
        Some(FuncUnstId::MinusDi),
        IN_HLC,
        PERIOD_14_MIN_1,
        OUT_REAL,
    ),
    def(
        FuncId::MinusDm,
        "MINUS_DM",
        Group::Momentum,
        "Minus Directional Movement",
        Some(FuncUnstId::MinusDm),
        IN_HL,
        PERIOD_14_MIN_1,
        OUT_REAL,
    ),
    def(
        FuncId::Mom,
        "MOM",
        Group::Momentum,
        "Momentum",
        None,
        IN_REAL,
        &[time_period(10.0, 1)],
        OUT_REAL,
    ),
    def(
        FuncId::PlusDi,
        "PLUS_DI",
        Group::Momentum,
        "Plus Directional Indicator",
        Some(FuncUnstId::PlusDi),
        IN_HLC,
        PERIOD_14_MIN_1,
        OUT_REAL,
    ),
    def(
        FuncId::PlusDm,
        "PLUS_DM",
        Group::Momentum,
        "Plus Directional Movement",
        Some(FuncUnstId::PlusDm),
        IN_HL,
        PERIOD_14_MIN_1,
        OUT_REAL,
    ),
    def(
        FuncId::Roc,
        "ROC",
        Group::Momentum,
        "Rate of change : ((price/prevPrice)-1)*100",
        None,
        IN_REAL,
        &[time_period(10.0, 1)],
        OUT_REAL,
    ),
    def(
        FuncId::Rsi,
        "RSI",
        Group::Momentum,
        "Relative Strength Index",
        Some(FuncUnstId::Rsi),
        IN_REAL,
        PERIOD_14,
        OUT_REAL,
    ),
    def(
        FuncId::Stoch,
        "STOCH",
        Group::Momentum,
        "Stochastic",
        None,
        IN_HLC,
        &[
            FAST_K,
            period(
                "optInSlowK_Period",
                "Slow-K Period",
                "Smoothing for making the Slow-K line. Usually set to 3",
                3.0,
                1,
            ),
            ma_type(
                "optInSlowK_MAType",
                "Slow-K MA",
                "Type of Moving Average for Slow-K",
            ),
            period(
                "optInSlowD_Period",
                "Slow-D Period",
                "Smoothing for making the Slow-D line",
                3.0,
                1,
            ),
            ma_type(
                "optInSlowD_MAType",
                "Slow-D MA",
                "Type of Moving Average for Slow-D",
            ),
        ],
        &[
            OutputDef::real("outSlowK", &[OutputFlag::DashLine]),
            OutputDef::real("outSlowD", &[OutputFlag::DashLine]),
        ],
    ),
    def(
        FuncId::Stochf,
        "STOCHF",
        Group::Momentum,
        "Stochastic Fast",
        None,
        IN_HLC,
        &[FAST_K, FAST_D, FAST_D_MA],
        OUT_FAST_STOCH,
    ),
    def(
        FuncId::Stochrsi,
        "STOCHRSI",
        Group::Momentum,
        "Stochastic Relative Strength Index",
        Some(FuncUnstId::Stochrsi),
        IN_REAL,
        &[time_period(14.0, 2), FAST_K, FAST_D, FAST_D_MA],
        OUT_FAST_STOCH,
    ),
    // Overlap Studies
    def(
        FuncId::Bbands,
        "BBANDS",
        Group::Overlap,
        "Bollinger Bands",
        None,
        IN_REAL,
        &[
            time_period(5.0, 2),
            real(
                "optInNbDevUp",
                "Deviations up",
                "Deviation multiplier for upper band",
                2.0,
                DEVIATIONS,
            ),
            real(
                "optInNbDevDn",
                "Deviations down",
                "Deviation multiplier for lower band",
                2.0,
                DEVIATIONS,
            ),
            ma_type("optInMAType", "MA Type", "Type of Moving Average"),
        ],
        &[
            OutputDef::real("outRealUpperBand", &[OutputFlag::UpperLimit]),
            OutputDef::real("outRealMiddleBand", &[OutputFlag::Line]),
            OutputDef::real("outRealLowerBand", &[OutputFlag::LowerLimit]),
        ],
    ),
    def(
        FuncId::Dema,
        "DEMA",
        Group::Overlap,
        "Double Exponential Moving Average",
        None,
        IN_REAL,
        PERIOD_30,
        OUT_REAL,
    ),
    def(
        FuncId::Ema,
        "EMA",
        Group::Overlap,
        "Exponential Moving Average",
        Some(FuncUnstId::Ema),
        IN_REAL,
        PERIOD_30,
        OUT_REAL,
    ),
    def(
        FuncId::HtTrendline,
        "HT_TRENDLINE",
        Group::Overlap,
        "Hilbert Transform - Instantaneous Trendline",
        Some(FuncUnstId::HtTrendline),
        IN_REAL,
        &[],
        OUT_REAL,
    ),
    def(
        FuncId::Kama,
        "KAMA",
        Group::Overlap,
        "Kaufman Adaptive Moving Average",
        Some(FuncUnstId::Kama),
        IN_REAL,
        PERIOD_30,
        OUT_REAL,
    ),
    def(
        FuncId::Ma,
        "MA",
        Group::Overlap,
        "Moving average",
        None,
        IN_REAL,
        &[
            time_period(30.0, 1),
            ma_type("optInMAType", "MA Type", "Type of Moving Average"),
        ],
        OUT_REAL,
    ),
    def(
        FuncId::Mama,
        "MAMA",
        Group::Overlap,
        "MESA Adaptive Moving Average",
        Some(FuncUnstId::Mama),
        IN_REAL,
        &[
            real(
                "optInFastLimit",
                "Fast Limit",
                "Upper limit use in the adaptive algorithm",
                0.5,
                LIMITS,
            ),
            real(
                "optInSlowLimit",
                "Slow Limit",
                "Lower limit use in the adaptive algorithm",
                0.05,
                LIMITS,
            ),
        ],
        &[
            OutputDef::real("outMAMA", &[OutputFlag::Line]),
            OutputDef::real("outFAMA", &[OutputFlag::DashLine]),
        ],
    ),
    def(
        FuncId::Sma,
        "SMA",
        Group::Overlap,
        "Simple Moving Average",
        None,
        IN_REAL,
        PERIOD_30,
        OUT_REAL,
    ),
    def(
        FuncId::T3,
        "T3",
        Group::Overlap,
        "Triple Exponential Moving Average (T3)",
        Some(FuncUnstId::T3),
        IN_REAL,
        &[
            time_period(5.0, 2),
            real(
                "optInVFactor",
                "Volume Factor",
                "Volume Factor",
                0.7,
                RealRange {
                    min: 0.0,
                    max: 1.0,
                    precision: 2,
                    suggested_start: 0.01,
                    suggested_end: 1.0,
                    suggested_increment: 0.05,
                },
            ),
        ],
        OUT_REAL,
    ),
    def(
        FuncId::Tema,
        "TEMA",
        Group::Overlap,
        "Triple Exponential Moving Average",
        None,
        IN_REAL,
        PERIOD_30,
        OUT_REAL,
    ),
    def(
        FuncId::Trima,
        "TRIMA",
        Group::Overlap,
        "Triangular Moving Average",
        None,
        IN_REAL,
        PERIOD_30,
        OUT_REAL,
    ),
    def(
        FuncId::Wma,
        "WMA",
        Group::Overlap,
        "Weighted Moving Average",
        None,
        IN_REAL,
        PERIOD_30,
        OUT_REAL,
    ),
    // Pattern Recognition
    def(
        FuncId::CdlDoji,
        "CDLDOJI",
        Group::Pattern,
        "Doji",
        None,
        IN_OHLC,
        &[],
        OUT_PATTERN,
    ),
    def(
        FuncId::CdlEngulfing,
        "CDLENGULFING",
        Group::Pattern,
        "Engulfing Pattern",
        None,
        IN_OHLC,
        &[],
        OUT_BULL_BEAR,
    ),
    def(
        FuncId::CdlHammer,
        "CDLHAMMER",
        Group::Pattern,
        "Hammer",
        None,
        IN_OHLC,
        &[],
        OUT_PATTERN,
    ),
    // Price Transform
    def(
        FuncId::AvgPrice,
        "AVGPRICE",
        Group::PriceTransform,
        "Average Price",
        None,
        IN_OHLC,
        &[],
        OUT_REAL,
    ),
    def(
        FuncId::MedPrice,
        "MEDPRICE",
        Group::PriceTransform,
        "Median Price",
        None,
        IN_HL,
        &[],
        OUT_REAL,
    ),
    def(
        FuncId::TypPrice,
        "TYPPRICE",
        Group::PriceTransform,
        "Typical Price",
        None,
        IN_HLC,
        &[],
        OUT_REAL,
    ),
    def(
        FuncId::WclPrice,
        "WCLPRICE",
        Group::PriceTransform,
        "Weighted Close Price",
        None,
        IN_HLC,
        &[],
        OUT_REAL,
    ),
    // Statistic Functions
    def(
        FuncId::Correl,
        "CORREL",
        Group::Statistic,
        "Pearson's Correlation Coefficient (r)",
        None,
        IN_REAL_PAIR,
        &[time_period(30.0, 1)],
        OUT_REAL,
    ),
    def(
        FuncId::Stddev,
        "STDDEV",
        Group::Statistic,
        "Standard Deviation",
        None,
        IN_REAL,
        &[
            time_period(5.0, 2),
            real("optInNbDev", "Deviations", "Nb of deviations", 1.0, DEVIATIONS),
        ],
        OUT_REAL,
    ),
    def(
        FuncId::Var,
        "VAR",
        Group::Statistic,
        "Variance",
        None,
        IN_REAL,
        &[
            time_period(5.0, 1),
            real("optInNbDev", "Deviations", "Nb of deviations", 1.0, DEVIATIONS),
        ],
        OUT_REAL,
    ),
    // Volatility Indicators
    def(
        FuncId::Atr,
        "ATR",
        Group::Volatility,
        "Average True Range",
        Some(FuncUnstId::Atr),
        IN_HLC,
        PERIOD_14_MIN_1,
        OUT_REAL,
    ),
    def(
        FuncId::Natr,
        "NATR",
        Group::Volatility,
        "Normalized Average True Range",
        Some(FuncUnstId::Natr),
        IN_HLC,
        PERIOD_14_MIN_1,
        OUT_REAL,
    ),
    def(
        FuncId::Trange,
        "TRANGE",
        Group::Volatility,
        "True Range",
        None,
        IN_HLC,
        &[],
        OUT_REAL,
    ),
    // Volume Indicators
    def(
        FuncId::Obv,
        "OBV",
        Group::Volume,
        "On Balance Volume",
        None,
        IN_REAL_VOLUME,
        &[],
        OUT_REAL,
    ),
];

static INDEX: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    FUNCTIONS
        .iter()
        .enumerate()
        .map(|(position, def)| (def.name, position))
        .collect()
});

// ============================================================================
// Lookups
// ============================================================================

/// Every registered function, ordered by group then name.
#[must_use]
pub fn functions() -> &'static [FunctionDef] {
    FUNCTIONS
}

/// Registry entry of `name`. Names are case-sensitive.
///
/// # Errors
///
/// Returns [`TaError::UnknownFunction`] if no function has that name.
pub fn lookup(name: &str) -> Result<&'static FunctionDef> {
    INDEX
        .get(name)
        .map(|&position| &FUNCTIONS[position])
        .ok_or_else(|| TaError::UnknownFunction(name.to_string()))
}

/// Names of every registered function, ordered by group then name.
#[must_use]
pub fn list() -> Vec<&'static str> {
    FUNCTIONS.iter().map(|def| def.name).collect()
}

/// Serialisable signature of `name`.
///
/// # Errors
///
/// Returns [`TaError::UnknownFunction`] if no function has that name.
pub fn describe(name: &str) -> Result<FunctionSignature> {
    lookup(name).map(FunctionDef::signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{InputKind, ValueType};
    use std::collections::HashSet;

    #[test]
    fn test_catalog_size() {
        assert_eq!(functions().len(), 48);
        assert_eq!(INDEX.len(), 48);
    }

    #[test]
    fn test_catalog_is_sorted_by_group_then_name() {
        for pair in FUNCTIONS.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                (a.group, a.name) < (b.group, b.name),
                "{} listed before {}",
                a.name,
                b.name
            );
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<FuncId> = FUNCTIONS.iter().map(|def| def.id).collect();
        assert_eq!(ids.len(), FUNCTIONS.len());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(lookup("SMA").unwrap().id, FuncId::Sma);
        assert_eq!(
            lookup("sma"),
            Err(TaError::UnknownFunction("sma".to_string()))
        );
        assert!(lookup("UNKNOWN_NAME").is_err());
    }

    #[test]
    fn test_list_starts_with_cycle_group() {
        let names = list();
        assert_eq!(names.first(), Some(&"HT_DCPERIOD"));
        assert_eq!(names.last(), Some(&"OBV"));
        assert!(names.contains(&"CDLENGULFING"));
    }

    #[test]
    fn test_defaults_lie_within_ranges() {
        for def in functions() {
            for opt in def.opt_inputs {
                match opt.kind {
                    OptInputKind::IntegerRange(range) => {
                        assert_eq!(opt.default_value.fract(), 0.0, "{}", def.name);
                        assert!(range.contains(opt.default_value as i64), "{}", def.name);
                    }
                    OptInputKind::RealRange(range) => {
                        assert!(range.contains(opt.default_value), "{}", def.name);
                    }
                    OptInputKind::IntegerList(entries) => {
                        assert!(entries
                            .iter()
                            .any(|&(_, code)| f64::from(code) == opt.default_value));
                    }
                }
            }
        }
    }

    #[test]
    fn test_unstable_families_match_names() {
        for def in functions() {
            if let Some(family) = def.unstable {
                assert_eq!(family.name(), def.name);
            }
        }
    }

    #[test]
    fn test_describe_bbands() {
        let signature = describe("BBANDS").unwrap();
        assert_eq!(signature.group, Group::Overlap);
        assert_eq!(signature.opt_inputs.len(), 4);
        assert_eq!(signature.opt_inputs[3].kind, ValueType::Integer);
        assert_eq!(
            signature.opt_inputs[3].list.as_ref().and_then(|l| l.code("T3")),
            Some(8)
        );
        let outputs: Vec<_> = signature.outputs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            outputs,
            ["outRealUpperBand", "outRealMiddleBand", "outRealLowerBand"]
        );
    }

    #[test]
    fn test_price_inputs_name_their_fields() {
        let mfi = lookup("MFI").unwrap();
        assert!(matches!(mfi.inputs[0].kind, InputKind::Price(fields) if fields.len() == 4));
        let keys: Vec<_> = lookup("OBV").unwrap().input_keys().collect();
        assert_eq!(keys, ["inReal", "volume"]);
    }
}
