use portfolio_forge_core::content::PortfolioContent;
use portfolio_forge_core::fileset::FileSet;
use portfolio_forge_core::materialize::{
    materialize, DATA_MODULE_PATH, LAYOUT_PATH, VARIANT_NAMESPACE,
};
use serde_json::json;

fn sample_content() -> PortfolioContent {
    PortfolioContent::from_value(json!({
        "home": { "name": "Ada Lovelace" },
        "aboutMe": {},
        "skills": {},
        "work": {},
        "contact": { "email": "ada@example.com" }
    }))
    .expect("sample content is schema-shaped")
}

fn base_files() -> FileSet {
    vec![
        ("package.json", "{ \"name\": \"portfolio\" }"),
        ("app/globals.css", "body { margin: 0 }"),
        ("components/ui/button.tsx", "export const Button = () => null"),
        // A stale copy under the variant namespace; the variant set replaces it.
        ("components/developer/Home.tsx", "stale"),
    ]
    .into_iter()
    .collect()
}

fn variant_files() -> FileSet {
    vec![
        ("Home.tsx", "export default function Home() {}"),
        ("AboutMe.tsx", "export default function AboutMe() {}"),
        ("Skills.tsx", "export default function Skills() {}"),
        ("Work.tsx", "export default function Work() {}"),
        ("Contact.tsx", "export default function Contact() {}"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn produces_one_entry_page_per_section() {
    let out = materialize(&base_files(), &variant_files(), &sample_content());

    for path in [
        "app/page.tsx",
        "app/about/page.tsx",
        "app/skills/page.tsx",
        "app/work/page.tsx",
        "app/contact/page.tsx",
    ] {
        assert!(out.contains(path), "Missing entry page {path}");
    }
    assert!(out.contains(DATA_MODULE_PATH), "Missing content module");
    assert!(out.contains(LAYOUT_PATH), "Missing root layout");
}

#[test]
fn variant_namespace_is_rerooted() {
    let out = materialize(&base_files(), &variant_files(), &sample_content());

    assert!(
        out.paths().all(|p| !p.starts_with(VARIANT_NAMESPACE)),
        "No file may remain under the variant namespace"
    );
    assert_eq!(
        out.get("components/Home.tsx"),
        Some("export default function Home() {}"),
        "Variant component replaces any stale base copy"
    );
    assert!(out.contains("components/Contact.tsx"));
}

#[test]
fn base_files_survive_untouched() {
    let out = materialize(&base_files(), &variant_files(), &sample_content());
    assert_eq!(out.get("package.json"), Some("{ \"name\": \"portfolio\" }"));
    assert_eq!(out.get("components/ui/button.tsx"), Some("export const Button = () => null"));
}

#[test]
fn entry_pages_wire_content_to_components() {
    let out = materialize(&base_files(), &variant_files(), &sample_content());

    let home = out.get("app/page.tsx").unwrap();
    assert!(home.contains("import { content } from '../content/data'"));
    assert!(home.contains("import HomeComponent from '../components/Home'"));
    assert!(home.contains("<HomeComponent content={content.home} />"));

    let about = out.get("app/about/page.tsx").unwrap();
    assert!(about.contains("import { content } from '../../content/data'"));
    assert!(about.contains("<AboutMeComponent content={content.aboutMe} />"));
}

#[test]
fn data_module_embeds_serialized_content() {
    let out = materialize(&base_files(), &variant_files(), &sample_content());
    let module = out.get(DATA_MODULE_PATH).unwrap();
    assert!(module.starts_with("export const content = {"));
    assert!(module.contains("\"name\": \"Ada Lovelace\""));
    assert!(module.contains("\"aboutMe\""));
}

#[test]
fn layout_links_every_entry_page() {
    let out = materialize(&base_files(), &variant_files(), &sample_content());
    let layout = out.get(LAYOUT_PATH).unwrap();
    for href in ["/about", "/skills", "/work", "/contact"] {
        assert!(layout.contains(&format!("href=\"{href}\"")), "Layout must link {href}");
    }
}

#[test]
fn output_order_is_deterministic() {
    let a = materialize(&base_files(), &variant_files(), &sample_content());
    let b = materialize(&base_files(), &variant_files(), &sample_content());
    let order_a: Vec<&str> = a.paths().collect();
    let order_b: Vec<&str> = b.paths().collect();
    assert_eq!(order_a, order_b);

    // Base files lead, the layout closes the set.
    assert_eq!(order_a.first(), Some(&"package.json"));
    assert_eq!(order_a.last(), Some(&LAYOUT_PATH));
}
