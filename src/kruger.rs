//! Series in the third flattening `n`: the Krüger Alpha and Beta
//! coefficients used by the transverse Mercator projection, the meridional
//! radius `A` and the OSGR meridional coefficients.
//!
//! Coefficients follow Karney (2011), "Transverse Mercator with an accuracy
//! of a few nanometers", eqs. 35 and 36, see also
//! <https://geographiclib.sourceforge.io/html/tmseries30.html>.

use num::rational::Ratio;

use crate::utility::{fdot, fpowers, fsum};

macro_rules! q {
    ($n:expr, $d:expr) => {
        Ratio::new_raw($n, $d)
    };
}

/// Highest supported series order
pub const MAX_ORDER: usize = 8;

/// Row `i` holds the coefficients of `n^(i+1) .. n^8` for `alpha[i+1]`.
pub(crate) static ALPHA: [&[Ratio<i64>]; MAX_ORDER] = [
    &[q!(1, 2), q!(-2, 3), q!(5, 16), q!(41, 180), q!(-127, 288), q!(7891, 37800), q!(72161, 387_072), q!(-18_975_107, 50_803_200)],
    &[q!(13, 48), q!(-3, 5), q!(557, 1440), q!(281, 630), q!(-1_983_433, 1_935_360), q!(13769, 28800), q!(148_003_883, 174_182_400)],
    &[q!(61, 240), q!(-103, 140), q!(15061, 26880), q!(167_603, 181_440), q!(-67_102_379, 29_030_400), q!(79_682_431, 79_833_600)],
    &[q!(49561, 161_280), q!(-179, 168), q!(6_601_661, 7_257_600), q!(97445, 49896), q!(-40_176_129_013, 7_664_025_600)],
    &[q!(34729, 80640), q!(-3_418_889, 1_995_840), q!(14_644_087, 9_123_840), q!(2_605_413_599, 622_702_080)],
    &[q!(212_378_941, 319_334_400), q!(-30_705_481, 10_378_368), q!(175_214_326_799, 58_118_860_800)],
    &[q!(1_522_256_789, 1_383_782_400), q!(-16_759_934_899, 3_113_510_400)],
    &[q!(1_424_729_850_961, 743_921_418_240)],
];

/// Row `i` holds the coefficients of `n^(i+1) .. n^8` for `beta[i+1]`.
pub(crate) static BETA: [&[Ratio<i64>]; MAX_ORDER] = [
    &[q!(1, 2), q!(-2, 3), q!(37, 96), q!(-1, 360), q!(-81, 512), q!(96199, 604_800), q!(-5_406_467, 38_707_200), q!(7_944_359, 67_737_600)],
    &[q!(1, 48), q!(1, 15), q!(-437, 1440), q!(46, 105), q!(-1_118_711, 3_870_720), q!(51841, 1_209_600), q!(24_749_483, 348_364_800)],
    &[q!(17, 480), q!(-37, 840), q!(-209, 4480), q!(5569, 90720), q!(9_261_899, 58_060_800), q!(-6_457_463, 17_740_800)],
    &[q!(4397, 161_280), q!(-11, 504), q!(-830_251, 7_257_600), q!(466_511, 2_494_800), q!(324_154_477, 7_664_025_600)],
    &[q!(4583, 161_280), q!(-108_847, 3_991_680), q!(-8_005_831, 63_866_880), q!(22_894_433, 124_540_416)],
    &[q!(20_648_693, 638_668_800), q!(-16_363_163, 518_918_400), q!(-2_204_645_983, 12_915_302_400)],
    &[q!(219_941_297, 5_535_129_600), q!(-497_323_811, 12_454_041_600)],
    &[q!(191_773_887_257, 3_719_607_091_200)],
];

/// Nearest `f64` to an exact rational.
///
/// Every numerator and denominator in the tables is below `2^53`, so both
/// convert exactly and the quotient is correctly rounded.
#[allow(clippy::cast_precision_loss)]
fn to_f64(q: &Ratio<i64>) -> f64 {
    *q.numer() as f64 / *q.denom() as f64
}

/// Evaluate the first `order` coefficients of a Krüger series at `n`.
///
/// Coefficient `i` is the compensated dot product of row `i` against
/// `n^(i+1) .. n^order`.
pub(crate) fn kseries(table: &[&[Ratio<i64>]; MAX_ORDER], n: f64, order: usize) -> Vec<f64> {
    let order = order.min(MAX_ORDER);
    let ns = fpowers(n, order);

    (0..order)
        .map(|i| {
            let row: Vec<f64> = table[i][..order - i].iter().map(to_f64).collect();
            fdot(&row, &ns[i..])
        })
        .collect()
}

/// UTM meridional radius `A = a / (1 + n) * (1 + n^2/4 + n^4/64 + ...)`.
pub(crate) fn meridional_radius(a: f64, n: f64) -> f64 {
    let p = fpowers(n * n, 5);
    let terms = [
        65536.,
        16384. * p[0],
        1024. * p[1],
        256. * p[2],
        100. * p[3],
        49. * p[4],
    ];

    a / (1. + n) * (fsum(terms) / 65536.)
}

/// OSGR meridional coefficients `(Ma, Mb, Mc, Md)`.
pub(crate) fn mabcd(n: f64) -> [f64; 4] {
    let ns = fpowers(n, 3);
    let (n1, n2, n3) = (ns[0], ns[1], ns[2]);

    [
        fdot(&[1., n1, n2, n3], &[4., 4., 5., 5.]) / 4.,
        fdot(&[n1, n2, n3], &[24., 24., 21.]) / 8.,
        fdot(&[n2, n3], &[15., 15.]) / 8.,
        35. * n3 / 24.,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    // WGS84 third flattening
    const N: f64 = 0.001_679_220_386_383_704_7;

    fn rel_eq(got: f64, expected: f64) -> bool {
        ((got - expected) / expected).abs() < 1e-12
    }

    #[test]
    fn alpha_order_8() {
        let alpha = kseries(&ALPHA, N, 8);
        let expected = [
            8.377_318_206_244_698e-4,
            7.608_527_773_572_489e-7,
            1.197_645_503_242_491_9e-9,
            2.429_170_680_397_090_4e-12,
            5.711_818_370_428_019e-15,
        ];
        assert_eq!(alpha.len(), 8);
        for (got, exp) in alpha.iter().zip(expected) {
            assert!(rel_eq(*got, exp), "{got} vs {exp}");
        }
    }

    #[test]
    fn beta_order_8() {
        let beta = kseries(&BETA, N, 8);
        let expected = [
            8.377_321_640_579_486e-4,
            5.905_870_152_220_365e-8,
            1.673_482_665_343_824_7e-10,
            2.164_798_110_490_642e-13,
            3.787_930_968_626_02e-16,
        ];
        for (got, exp) in beta.iter().zip(expected) {
            assert!(rel_eq(*got, exp), "{got} vs {exp}");
        }
    }

    #[test]
    fn lower_order_truncates_rows() {
        let alpha = kseries(&ALPHA, N, 4);
        assert_eq!(alpha.len(), 4);
        assert!(rel_eq(alpha[0], 8.377_318_206_303_529e-4));
    }

    #[test]
    fn table_shape() {
        for (i, row) in ALPHA.iter().enumerate() {
            assert_eq!(row.len(), MAX_ORDER - i);
            assert_eq!(BETA[i].len(), MAX_ORDER - i);
        }
    }

    #[test]
    fn utm_meridional_radius() {
        assert!((meridional_radius(6_378_137., N) - 6_367_449.145_823_415).abs() < 1e-6);
        assert_eq!(meridional_radius(6_371_000., 0.), 6_371_000.);
    }

    #[test]
    fn osgr_coefficients() {
        let m = mabcd(N);
        let expected = [
            1.001_682_751_031_558_7,
            5.046_132_931_933_29e-3,
            5.295_967_762_434_471_5e-6,
            6.905_257_797_685_78e-9,
        ];
        for (got, exp) in m.iter().zip(expected) {
            assert!(rel_eq(*got, exp), "{got} vs {exp}");
        }
    }
}
