//! Template materialization: merge the base and variant file sets with the
//! structured content into the final ordered set of files to publish.
//!
//! Output order is deterministic: base files, entry pages, re-rooted variant
//! components, the content module, the root layout. That order is also the
//! publish order.

use crate::content::PortfolioContent;
use crate::fileset::FileSet;

/// Namespace inside the base template reserved for variant components. Base
/// entries under it are dropped; the variant file set replaces them.
pub const VARIANT_NAMESPACE: &str = "components/developer/";

/// Flat namespace variant components are re-rooted into.
const COMPONENTS_PREFIX: &str = "components/";

/// Path of the synthesized content module.
pub const DATA_MODULE_PATH: &str = "content/data.ts";

/// Path of the synthesized root layout.
pub const LAYOUT_PATH: &str = "app/layout.tsx";

struct EntryPage {
    path: &'static str,
    /// Relative prefix from the page file back to the app root.
    up: &'static str,
    component: &'static str,
    module: &'static str,
    section: &'static str,
    function: &'static str,
}

/// One entry page per content section.
const ENTRY_PAGES: [EntryPage; 5] = [
    EntryPage {
        path: "app/page.tsx",
        up: "../",
        component: "HomeComponent",
        module: "Home",
        section: "home",
        function: "HomePage",
    },
    EntryPage {
        path: "app/about/page.tsx",
        up: "../../",
        component: "AboutMeComponent",
        module: "AboutMe",
        section: "aboutMe",
        function: "AboutPage",
    },
    EntryPage {
        path: "app/skills/page.tsx",
        up: "../../",
        component: "SkillsComponent",
        module: "Skills",
        section: "skills",
        function: "SkillsPage",
    },
    EntryPage {
        path: "app/work/page.tsx",
        up: "../../",
        component: "WorkComponent",
        module: "Work",
        section: "work",
        function: "WorkPage",
    },
    EntryPage {
        path: "app/contact/page.tsx",
        up: "../../",
        component: "ContactComponent",
        module: "Contact",
        section: "contact",
        function: "ContactPage",
    },
];

impl EntryPage {
    fn render(&self) -> String {
        format!(
            "import {{ content }} from '{up}content/data'\n\
             import {component} from '{up}components/{module}'\n\
             \n\
             export default function {function}() {{\n\
             \x20   return <{component} content={{content.{section}}} />\n\
             }}\n",
            up = self.up,
            component = self.component,
            module = self.module,
            section = self.section,
            function = self.function,
        )
    }
}

/// Merge `base` and `variant` with the content into the publishable file set.
///
/// Infallible on well-formed inputs; content validation happens before this
/// step runs.
pub fn materialize(base: &FileSet, variant: &FileSet, content: &PortfolioContent) -> FileSet {
    let mut out = FileSet::new();

    // Base files, minus the variant's reserved namespace.
    for (path, body) in base.iter() {
        if path.starts_with(VARIANT_NAMESPACE) {
            continue;
        }
        out.insert(path, body);
    }

    for page in &ENTRY_PAGES {
        out.insert(page.path, page.render());
    }

    // Re-root variant components into the flat components namespace.
    for (path, body) in variant.iter() {
        out.insert(format!("{COMPONENTS_PREFIX}{path}"), body);
    }

    out.insert(DATA_MODULE_PATH, data_module(content));
    out.insert(LAYOUT_PATH, ROOT_LAYOUT);

    out
}

/// The shared content module: the serialized content under a fixed symbol.
/// Key order is stable (schema field order; link maps are sorted).
fn data_module(content: &PortfolioContent) -> String {
    let json = serde_json::to_string_pretty(content)
        .expect("portfolio content always serializes to JSON");
    format!("export const content = {json}\n")
}

/// Root layout with static navigation to each entry page.
const ROOT_LAYOUT: &str = r#"import type { Metadata } from "next";
import "./globals.css";
import Link from "next/link";
import { Button } from "@/components/ui/button";

export const metadata: Metadata = {
  title: "Portfolio",
  description: "Personal Portfolio Website",
};

export default function RootLayout({
  children,
}: Readonly<{
  children: React.ReactNode;
}>) {
  return (
    <html lang="en">
      <body>
        <header className="container mx-auto px-4 py-6">
          <nav className="flex items-center justify-between">
            <Link href="/" className="text-xl font-bold">
              {'<Portfolio />'}
            </Link>
            <div className="flex items-center gap-8">
              <Link href="/about" className="text-sm hover:text-gray-300">
                About
              </Link>
              <Link href="/skills" className="text-sm hover:text-gray-300">
                Skills
              </Link>
              <Link href="/work" className="text-sm hover:text-gray-300">
                Work
              </Link>
              <Link href="/contact" className="text-sm hover:text-gray-300">
                Contact
              </Link>
              <Button className="bg-white text-black hover:bg-gray-200">
                Download CV
              </Button>
            </div>
          </nav>
        </header>
        {children}
      </body>
    </html>
  );
}
"#;
