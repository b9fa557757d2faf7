//! Browser tests for the DOM bindings
//!
//! Run with `wasm-pack test --headless --firefox apcea-ui`.

use apcea::config::AnimationConfig;
use apcea::content::{Course, CourseCatalog, CourseCategory};
use apcea::CatalogView;
use apcea_ui::animations::{apply_stagger, Animations};
use apcea_ui::widgets::{AccordionController, CounterController, TabsController, Widget};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn fixture(html: &str) -> Element {
    let document = document();
    let root = document.create_element("div").unwrap();
    root.set_inner_html(html);
    document.body().unwrap().append_child(&root).unwrap();
    root
}

fn click(element: &Element) {
    element.dyn_ref::<HtmlElement>().unwrap().click();
}

fn all(root: &Element, selector: &str) -> Vec<Element> {
    apcea_ui::dom::query_all(root, selector)
}

fn active(elements: &[Element], class: &str) -> Vec<usize> {
    elements
        .iter()
        .enumerate()
        .filter(|(_, e)| e.class_list().contains(class))
        .map(|(i, _)| i)
        .collect()
}

#[wasm_bindgen_test]
fn tabs_keep_exactly_one_active() {
    let root = fixture(
        r#"<div data-tabs>
            <button class="tab-btn"></button><button class="tab-btn active"></button>
            <div class="tab-panel"></div><div class="tab-panel active"></div>
        </div>"#,
    );
    let container = root.query_selector("[data-tabs]").unwrap().unwrap();
    let mut tabs = TabsController::bind_scope(&container).unwrap();
    let buttons = all(&root, ".tab-btn");
    let panels = all(&root, ".tab-panel");

    assert_eq!(active(&buttons, "active"), vec![0]);
    assert_eq!(active(&panels, "active"), vec![0]);

    click(&buttons[1]);
    assert_eq!(tabs.active(), Some(1));
    assert_eq!(active(&buttons, "active"), vec![1]);
    assert_eq!(active(&panels, "active"), vec![1]);

    tabs.dispose();
    click(&buttons[0]);
    assert_eq!(active(&buttons, "active"), vec![1]);
}

#[wasm_bindgen_test]
fn accordion_opens_at_most_one() {
    let root = fixture(
        r#"<div class="accordion">
            <div class="accordion-header">A</div><div class="accordion-body"></div>
            <div class="accordion-header">B</div><div class="accordion-body"></div>
        </div>"#,
    );
    let scope = root.query_selector(".accordion").unwrap().unwrap();
    let accordion = AccordionController::bind(&scope).unwrap();
    let headers = all(&root, ".accordion-header");
    let bodies = all(&root, ".accordion-body");

    assert!(active(&headers, "open").is_empty());

    click(&headers[0]);
    click(&headers[1]);
    assert_eq!(accordion.open(), Some(1));
    assert_eq!(active(&headers, "open"), vec![1]);
    assert_eq!(active(&bodies, "open"), vec![1]);

    click(&headers[1]);
    assert!(active(&headers, "open").is_empty());
    assert!(active(&bodies, "open").is_empty());
}

#[wasm_bindgen_test]
fn animation_scan_skips_visible_and_picks_up_new_nodes() {
    let root = fixture(
        r#"<div class="animate-fade visible"></div>
           <div class="animate-left"></div>
           <p>plain</p>"#,
    );
    let animations = Animations::new(&AnimationConfig::default()).unwrap();

    assert_eq!(animations.scan_within(&root), 1);
    assert_eq!(animations.scan_within(&root), 0);

    // A copy of an observed element is a different node
    let seen = root.query_selector(".animate-left").unwrap().unwrap();
    let copy = seen.clone_node_with_deep(true).unwrap();
    root.append_child(&copy).unwrap();
    let fresh = document().create_element("div").unwrap();
    fresh.set_class_name("animate-scale");
    root.append_child(&fresh).unwrap();

    assert_eq!(animations.scan_within(&root), 2);
    assert_eq!(animations.scan_within(&root), 0);
    animations.disconnect();
}

#[wasm_bindgen_test]
fn stagger_renumbers_after_injection() {
    let root = fixture(r#"<ul class="stagger" id="stagger-fixture"><li></li><li></li></ul>"#);
    apply_stagger(&document());

    let list = root.query_selector("#stagger-fixture").unwrap().unwrap();
    let extra = document().create_element("li").unwrap();
    list.append_child(&extra).unwrap();
    apply_stagger(&document());

    let indices: Vec<String> = all(&list, "li")
        .iter()
        .map(|li| {
            li.dyn_ref::<HtmlElement>()
                .unwrap()
                .style()
                .get_property_value("--stagger-i")
                .unwrap()
        })
        .collect();
    assert_eq!(indices, vec!["0", "1", "2"]);
}

#[wasm_bindgen_test]
fn course_catalog_builds_one_active_pair_and_switches() {
    let root = fixture(r#"<div><div class="tab-list"></div><div class="tab-panels"></div></div>"#);
    let container = root.first_element_child().unwrap();
    let catalog = CourseCatalog {
        categories: vec![
            CourseCategory {
                icon: "🎨".to_string(),
                name: "藝術".to_string(),
                courses: vec![Course {
                    name: "水墨畫".to_string(),
                    description: "入門".to_string(),
                    hours: "12".to_string(),
                    audience: "成人".to_string(),
                    fee: "3000".to_string(),
                }],
            },
            CourseCategory {
                icon: "📖".to_string(),
                name: "語文".to_string(),
                courses: vec![],
            },
        ],
    };

    let tabs = apcea_ui::content::build_catalog(&document(), &container, &CatalogView::from_catalog(&catalog))
        .unwrap();
    let buttons = all(&root, ".tab-btn");
    let panels = all(&root, ".tab-panel");
    assert_eq!(buttons.len(), 2);
    assert_eq!(buttons[0].text_content().unwrap(), "🎨 藝術");
    assert_eq!(active(&buttons, "active"), vec![0]);
    assert_eq!(active(&panels, "active"), vec![0]);

    click(&buttons[1]);
    assert_eq!(tabs.active(), Some(1));
    assert_eq!(active(&buttons, "active"), vec![1]);
    assert_eq!(active(&panels, "active"), vec![1]);
    assert!(panels[1].inner_html().contains("課程規劃中"));
}

#[wasm_bindgen_test]
fn course_catalog_needs_tab_regions() {
    let root = fixture(r#"<div><div class="tab-list"></div></div>"#);
    let container = root.first_element_child().unwrap();
    let built = apcea_ui::content::build_catalog(&document(), &container, &CatalogView::default());
    assert!(built.is_none());
}

#[wasm_bindgen_test]
fn counters_skip_non_numeric_targets() {
    let root = fixture(
        r#"<span data-target="1234">0</span>
           <span data-target="42+">0</span>
           <span data-target="abc">0</span>"#,
    );
    let mut counters = CounterController::bind_within(&root, &AnimationConfig::default()).unwrap();
    assert_eq!(counters.pending(), 2);
    counters.dispose();
}

#[wasm_bindgen_test]
fn module_url_is_known() {
    let url = apcea_ui::site::module_url().unwrap();
    assert!(url.starts_with("http"));
}
