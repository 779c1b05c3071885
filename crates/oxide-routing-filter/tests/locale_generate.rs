//! Generation through the locale filter.

mod common;
use common::*;

use oxide_router::{Generated, Router};
use oxide_routing_filter::{LocaleConfig, LocaleFilter};

#[test]
fn generate_prefixes_locale() {
    let fixture = locale_fixture(&LocaleConfig::new());
    let router = &fixture.router;
    assert_eq!(
        path_for(router, "product", &[("id", "1"), ("locale", "de")]),
        "/de/products/1"
    );
    assert_eq!(
        path_for(router, "product", &[("id", "1"), ("locale", "en")]),
        "/en/products/1"
    );
}

#[test]
fn generate_skips_default_locale_when_excluded() {
    let fixture = locale_fixture(&LocaleConfig::new());
    fixture.locale.set_include_default_locale(false);
    let router = &fixture.router;
    assert_eq!(
        path_for(router, "product", &[("id", "1"), ("locale", "en")]),
        "/products/1"
    );
    assert_eq!(
        path_for(router, "product", &[("id", "1"), ("locale", "de")]),
        "/de/products/1"
    );

    fixture.locale.set_include_default_locale(true);
    assert_eq!(
        path_for(router, "product", &[("id", "1"), ("locale", "en")]),
        "/en/products/1"
    );
}

#[test]
fn generate_invalid_locale_is_unprefixed() {
    let fixture = locale_fixture(&LocaleConfig::new());
    let router = &fixture.router;
    for locale in ["xx", ""] {
        let path = path_for(router, "products", &[("locale", locale)]);
        assert_eq!(path, "/products", "locale {locale:?}");
    }
}

#[test]
fn generate_defaults_to_current_locale() {
    let fixture = locale_fixture(&LocaleConfig::new());
    let router = &fixture.router;
    assert_eq!(path_for(router, "products", &[]), "/en/products");

    fixture.catalog.set_current_locale("de");
    assert_eq!(path_for(router, "products", &[]), "/de/products");

    fixture.catalog.set_current_locale("fr");
    assert_eq!(path_for(router, "products", &[]), "/products");

    fixture.catalog.reset_current_locale();
    fixture.locale.set_include_default_locale(false);
    assert_eq!(path_for(router, "products", &[]), "/products");
}

#[test]
fn generate_consumes_locale_option() {
    let fixture = locale_fixture(&LocaleConfig::new());
    let options = params(&[("locale", "de"), ("sort", "name")]);
    let generated = fixture.router.generate("products", options).unwrap();
    assert_eq!(
        generated,
        Generated::WithExtra("/de/products".into(), params(&[("sort", "name")]))
    );
}

#[test]
fn generate_absolute_url_inserts_after_host() {
    let locale = LocaleFilter::new(&LocaleConfig::new(), catalog()).unwrap();
    let router = with_routes(Router::new().filter(locale));
    let router = router.with_base_url("https://shop.example.com");

    let options = params(&[("id", "5"), ("locale", "de")]);
    assert_eq!(
        router.url_for("product", options).unwrap(),
        "https://shop.example.com/de/products/5"
    );
    assert_eq!(
        router.url_for("root", params(&[("locale", "de")])).unwrap(),
        "https://shop.example.com/de/"
    );
}

#[test]
fn generate_then_recognize_round_trips() {
    let fixture = locale_fixture(&LocaleConfig::new().include_default_locale(false));
    let router = &fixture.router;
    for locale in ["de", "en"] {
        let path = path_for(router, "product", &[("id", "42"), ("locale", locale)]);
        let matched = router.recognize_path(&path).unwrap();
        assert_eq!(matched.route.name.as_deref(), Some("product"));
        assert_eq!(matched.params.get("id"), Some("42"));
        if locale == "en" {
            // Default locale is not prefixed, so it is not recognized either.
            assert_eq!(path, "/products/42");
            assert_eq!(matched.params.get("locale"), None);
        } else {
            assert_eq!(matched.params.get("locale"), Some(locale));
        }
    }
}
