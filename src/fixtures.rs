#[cfg(test)]
pub mod test {
    use crate::assemble::BaseConfig;
    use crate::site::table_to_json;

    /// Base file of the Hedgehog documentation site.
    pub const HEDGEHOG_SITE: &str = r#"
title = "Hedgehog"
tagline = "Modern property-based testing system for Scala"
url = "https://hedgehogqa.github.io"
baseUrl = "/scala-hedgehog/"
onBrokenLinks = "throw"
favicon = "img/favicon.png"
organizationName = "hedgehogqa"
projectName = "scala-hedgehog"
plugins = ["docusaurus-lunr-search"]
presets = [
  ["@docusaurus/preset-classic", { docs = { path = "../generated-docs/target/mdoc/", sidebarPath = "sidebars.json", sidebarCollapsible = false, sidebarCollapsed = false }, theme = { customCss = "src/css/custom.css" } }],
]

[themeConfig]
separateCss = ["api"]

[themeConfig.colorMode]
respectPrefersColorScheme = true

[themeConfig.prism]
theme = "nightOwlLight"
darkTheme = "nightOwl"
additionalLanguages = ["java", "scala", "haskell"]

[themeConfig.navbar]
title = "Hedgehog"
logo = { alt = "Hedgehog Logo", src = "img/hedgehog-logo-32x32.png" }

[[themeConfig.navbar.items]]
to = "docs/"
activeBasePath = "docs"
label = "Docs"
position = "left"

[[themeConfig.navbar.items]]
href = "/scala-hedgehog/api"
label = "API"
target = "_blank"
position = "left"

[[themeConfig.navbar.items]]
href = "https://github.com/hedgehogqa/scala-hedgehog"
label = "GitHub"
position = "right"

[themeConfig.footer]
style = "dark"
copyright = "Copyright © Hedgehog, Website built with Docusaurus."

[[themeConfig.footer.links]]
title = "Docs"
items = [
  { label = "Docs", to = "docs/" },
  { label = "Guides", to = "docs/guides/" },
  { label = "Integration", to = "docs/integration/" },
]

[[themeConfig.footer.links]]
title = "More"
items = [{ label = "GitHub", href = "https://github.com/hedgehogqa/scala-hedgehog" }]
"#;

    /// Sidebar manifest of the Hedgehog documentation site.
    pub const HEDGEHOG_SIDEBARS: &str = r#"
[[docs]]
type = "category"
label = "Hedgehog for Scala"
items = ["hedgehog", "getting-started", "motivation", "resources", "alternatives"]

[[docs]]
type = "category"
label = "Guides"
items = [
  "guides/guides",
  "guides/tutorial",
  "guides/state-tutorial",
  "guides/state-tutorial-vars",
  "guides/migration-scalacheck",
  "guides/haskell-differences",
]

[[docs]]
type = "category"
label = "Integration"
items = ["integration/minitest"]
"#;

    pub fn hedgehog_base() -> BaseConfig {
        let table: toml::Table = toml::from_str(HEDGEHOG_SITE).unwrap();
        BaseConfig::from(table_to_json(table).unwrap())
    }

    #[test]
    fn hedgehog_base_has_theme_config() {
        let base = hedgehog_base();
        assert!(base.as_map()["themeConfig"].is_object());
    }
}
