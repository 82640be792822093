use musictech_e2e::pages::Header;
use musictech_e2e::plan::{Action, Check};
use musictech_e2e::playwright::{PlaywrightConfig, PlaywrightHandle};
use musictech_e2e::{plan_spec, PlannedStep, RunnerConfig, TestRunner, TestSpec, TextMatch};
use std::path::PathBuf;

fn specs_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("specs")
}

fn bundled(name: &str) -> TestSpec {
    TestSpec::load_all(&specs_dir())
        .unwrap()
        .into_iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| panic!("no bundled spec named {}", name))
}

fn card_counts(steps: &[PlannedStep]) -> Vec<u32> {
    steps
        .iter()
        .filter_map(|s| match &s.action {
            Action::Expect { check: Check::Count { count }, .. } => Some(*count),
            _ => None,
        })
        .collect()
}

/// Every scenario shipped with the crate must parse and plan.
#[test]
fn bundled_scenarios_plan_cleanly() {
    let specs = TestSpec::load_all(&specs_dir()).unwrap();
    assert_eq!(specs.len(), 14, "expected the bundled scenarios, found {}", specs.len());

    for spec in &specs {
        let steps = plan_spec(spec)
            .unwrap_or_else(|e| panic!("{} failed to plan: {}", spec.name, e));
        assert!(!steps.is_empty(), "{} planned no actions", spec.name);
    }
}

#[test]
fn site_scenarios_plan_expected_actions() {
    let expected = [
        ("search", 23),
        ("main-navigation", 19),
        ("not-found", 10),
        ("informational-pages", 20),
        ("api-console", 20),
        ("orders", 3),
    ];
    for (name, count) in expected {
        let steps = plan_spec(&bundled(name)).unwrap();
        assert_eq!(steps.len(), count, "{}: {:#?}", name, steps);
    }
}

#[test]
fn search_uses_the_header_search_box() {
    let steps = plan_spec(&bundled("search")).unwrap();
    let (input, button) = (Header::search_input(), Header::search_button());
    let fills = steps
        .iter()
        .filter(|s| matches!(&s.action, Action::Fill { target, .. } if *target == input))
        .count();
    let submits = steps
        .iter()
        .filter(|s| matches!(&s.action, Action::Click { target, .. } if *target == button))
        .count();
    assert_eq!((fills, submits), (5, 5));
    // nonsense query and blank query
    assert_eq!(card_counts(&steps), vec![0, 16]);
}

#[test]
fn navigation_checks_every_linked_route() {
    let steps = plan_spec(&bundled("main-navigation")).unwrap();
    let urls: Vec<String> = steps
        .iter()
        .filter_map(|s| match &s.action {
            Action::ExpectUrl { url: TextMatch::Exact(url) } => Some(url.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        urls,
        vec![
            "/products",
            "/api-test",
            "/",
            "/about",
            "/shipping",
            "/returns",
            "/terms",
            "/products"
        ]
    );
}

#[test]
fn terms_page_expects_ten_sections() {
    let steps = plan_spec(&bundled("informational-pages")).unwrap();
    assert!(card_counts(&steps).contains(&10));
}

#[test]
fn catalog_walk_expects_page_sizes() {
    let steps = plan_spec(&bundled("product-catalog")).unwrap();
    // pages 1, 2, 4, then back to 3
    assert_eq!(card_counts(&steps), vec![16, 16, 2, 16]);
}

#[test]
fn category_filter_tracks_filtered_totals() {
    let steps = plan_spec(&bundled("category-filter")).unwrap();
    // Studio Recording p1 and p2, Electronics, Synthesizers, all products
    assert_eq!(card_counts(&steps), vec![16, 4, 5, 15, 16]);

    let hidden = steps
        .iter()
        .filter(|s| matches!(s.action, Action::Expect { check: Check::Hidden, .. }))
        .count();
    assert_eq!(hidden, 2, "single-page categories hide pagination");
}

#[test]
fn cart_total_is_computed_from_fixture_price() {
    let steps = plan_spec(&bundled("add-to-cart")).unwrap();
    let total = steps.iter().find_map(|s| match &s.action {
        Action::Expect { check: Check::ContainsText { text: TextMatch::Exact(t) }, .. }
            if t.starts_with('$') =>
        {
            Some(t.clone())
        }
        _ => None,
    });
    assert_eq!(total.as_deref(), Some("$299.97"));
}

#[test]
fn invalid_zips_never_click_calculate() {
    let steps = plan_spec(&bundled("shipping-calculator")).unwrap();
    let clicks = steps
        .iter()
        .filter(|s| matches!(s.action, Action::Click { .. }))
        .count();
    assert_eq!(clicks, 2, "only 10001 and 00501 should be submitted");
}

#[test]
fn rendered_script_escapes_injection_payloads() {
    let steps = plan_spec(&bundled("login")).unwrap();
    let handle = PlaywrightHandle::new(PlaywrightConfig::default(), bundled("login").viewport);
    let script = handle.build_script(&steps);

    assert!(script.contains(r#".fill("' OR 1=1 --");"#));
    assert!(script.contains(r#"toHaveURL(new RegExp("/login"))"#));
    assert_eq!(script.matches("emit({ event: 'pass'").count(), steps.len());
}

#[tokio::test]
async fn dry_run_renders_every_bundled_scenario() {
    let output = tempfile::tempdir().unwrap();
    let runner = TestRunner::with_config(RunnerConfig {
        specs_dir: specs_dir(),
        output_dir: output.path().to_path_buf(),
        dry_run: true,
        ..Default::default()
    });

    let suite = runner.run_all().await.unwrap();
    assert_eq!(suite.failed, 0, "{:#?}", suite.results);
    assert_eq!(suite.skipped, suite.total);

    for result in &suite.results {
        let path = result.script_path.as_ref().unwrap();
        assert!(path.exists(), "missing script for {}", result.name);
    }
}
