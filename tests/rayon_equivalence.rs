#![cfg(feature = "rayon")]

use slidematch::lowlevel::{
    folded_surface, folded_surface_par, score_surface, score_surface_par, DistancePlan,
    MeanAbsErrorScalar, NccPlan, NccScalar,
};
use slidematch::{to_gray, Boundary, Metric, OwnedImage, Rgb, SearchConfig, Searcher};

fn make_image(width: usize, height: usize) -> OwnedImage<Rgb> {
    OwnedImage::from_fn(width, height, |row, col| {
        let value = ((col * 11) ^ (row * 3) ^ (col * row)) & 0xFF;
        Rgb((value as u32) * 0x010203 & 0xFF_FF_FF)
    })
    .unwrap()
}

#[test]
fn parallel_surfaces_are_identical() {
    let image = make_image(70, 45);
    let pattern = image.view().roi(12, 20, 9, 7).unwrap().to_owned_image();

    let plan = DistancePlan::from_view(pattern.view());
    let seq = score_surface::<MeanAbsErrorScalar, Rgb>(image.view(), &plan).unwrap();
    let par = score_surface_par::<MeanAbsErrorScalar, Rgb>(image.view(), &plan).unwrap();
    assert_eq!(seq, par);

    for boundary in [Boundary::Wrap, Boundary::Mirror] {
        let seq = folded_surface(image.view(), &plan, boundary).unwrap();
        let par = folded_surface_par(image.view(), &plan, boundary).unwrap();
        assert_eq!(seq, par);
    }

    let gray_image = to_gray(&image);
    let ncc_plan = NccPlan::from_view(to_gray(&pattern).view());
    let seq = score_surface::<NccScalar, f64>(gray_image.view(), &ncc_plan).unwrap();
    let par = score_surface_par::<NccScalar, f64>(gray_image.view(), &ncc_plan).unwrap();
    assert_eq!(seq, par);
}

#[test]
fn parallel_searcher_matches_sequential() {
    let image = make_image(64, 40);
    let pattern = image.view().roi(30, 8, 11, 6).unwrap().to_owned_image();

    for metric in [
        Metric::MeanAbsoluteError,
        Metric::NormalizedCrossCorrelation,
    ] {
        let base = SearchConfig {
            metric,
            topk: 5,
            ..SearchConfig::default()
        };
        let seq = Searcher::new(SearchConfig {
            parallel: false,
            ..base.clone()
        });
        let par = Searcher::new(SearchConfig {
            parallel: true,
            ..base
        });
        assert_eq!(
            seq.locate(image.view(), pattern.view()).unwrap(),
            par.locate(image.view(), pattern.view()).unwrap()
        );
    }
}
