//! The patch passes: map attributes, rule pruning, layer hints.

use std::path::{Path, PathBuf};

use tilestyle_xml::{Document, Element};

use crate::error::PatchError;
use crate::report::PatchReport;

/// Layer whose label cache must be cleared between renders.
const GEOGRAPHIC_LINE_LAYER: &str = "10m_geographicline";

/// Rewrites compiled style documents in place.
///
/// Holds the project paths that get embedded into the document; the passes
/// themselves are stateless linear scans.
#[derive(Debug, Clone)]
pub struct Patcher {
    base_dir: PathBuf,
    font_dir: PathBuf,
}

impl Patcher {
    /// Creates a patcher that embeds the given base and font directories
    /// into the map root.
    pub fn new(base_dir: PathBuf, font_dir: PathBuf) -> Self {
        Self { base_dir, font_dir }
    }

    /// Patches the document at `path`, overwriting it with the result.
    ///
    /// Any failure leaves the file untouched: the rewrite happens only
    /// after every pass has succeeded.
    pub fn patch_file(&self, path: &Path) -> Result<PatchReport, PatchError> {
        let mut doc = Document::parse_file(path)?;
        let report = self.patch_document(&mut doc)?;
        doc.write_file(path)?;
        Ok(report)
    }

    /// Applies all patch passes to an in-memory document.
    pub fn patch_document(&self, doc: &mut Document) -> Result<PatchReport, PatchError> {
        let mut report = PatchReport {
            base_dir: self.base_dir.display().to_string(),
            ..Default::default()
        };
        self.patch_map_attributes(doc.root_mut());
        prune_rules(doc.root_mut(), &mut report)?;
        patch_layers(doc.root_mut(), &mut report)?;
        Ok(report)
    }

    /// Pass 1: embed project paths on the root, drop the compile-time
    /// `maximum-extent` and `srs` attributes.
    fn patch_map_attributes(&self, root: &mut Element) {
        root.set_attr("font-directory", self.font_dir.display().to_string());
        root.set_attr("base", self.base_dir.display().to_string());
        // Absent on a re-patch; removal must stay idempotent.
        root.remove_attr("maximum-extent");
        root.remove_attr("srs");
    }
}

/// Pass 2: delete rules that can never draw anything.
///
/// Deletions are collected against a snapshot of each style's children and
/// applied afterwards, so the scan never removes from the list it is
/// iterating.
fn prune_rules(root: &mut Element, report: &mut PatchReport) -> Result<(), PatchError> {
    for style in root
        .children_mut()
        .iter_mut()
        .filter(|c| c.name() == "Style")
    {
        let style_name = style
            .attr("name")
            .ok_or_else(|| PatchError::MissingAttr {
                element: "Style".to_string(),
                attr: "name".to_string(),
            })?
            .to_string();

        let doomed: Vec<bool> = style
            .children()
            .iter()
            .map(|child| child.name() == "Rule" && rule_is_dead(child))
            .collect();
        let count = doomed.iter().filter(|d| **d).count();
        if count == 0 {
            continue;
        }

        let mut idx = 0;
        style.retain_children(|_| {
            let keep = !doomed[idx];
            idx += 1;
            keep
        });
        report.deleted_rules.push((style_name, count));
    }
    Ok(())
}

/// Whether a rule is guaranteed to produce no visible output.
fn rule_is_dead(rule: &Element) -> bool {
    rule.any_descendant(|e| match e.name() {
        // Only the literal "0" qualifies; "0.0" and friends are left alone.
        "LineSymbolizer" => e.attr("stroke-width") == Some("0"),
        // A label symbolizer with no text content renders nothing.
        // Whitespace-only content is NOT empty.
        "TextSymbolizer" | "ShieldSymbolizer" => e.text().is_empty(),
        _ => false,
    })
}

/// Pass 3: caching hints per layer, and removal of layers that reference
/// no style.
fn patch_layers(root: &mut Element, report: &mut PatchReport) -> Result<(), PatchError> {
    let mut doomed = Vec::with_capacity(root.children().len());
    for child in root.children_mut().iter_mut() {
        if child.name() != "Layer" {
            doomed.push(false);
            continue;
        }
        let name = child
            .attr("name")
            .ok_or_else(|| PatchError::MissingAttr {
                element: "Layer".to_string(),
                attr: "name".to_string(),
            })?
            .to_string();

        if name == GEOGRAPHIC_LINE_LAYER {
            child.set_attr("clear-label-cache", "yes");
            report.label_cache_cleared.push(name.clone());
        }

        match child.count_children_named("StyleName") {
            0 => {
                report.removed_layers.push(name);
                doomed.push(true);
                continue;
            }
            1 => {}
            // Multi-style layers render their datasource once per style;
            // caching the features avoids re-querying it.
            _ => {
                child.set_attr("cache-features", "yes");
                report.feature_cached.push(name.clone());
            }
        }
        doomed.push(false);
    }

    if report.removed_layers.is_empty() {
        return Ok(());
    }
    let mut idx = 0;
    root.retain_children(|_| {
        let keep = !doomed[idx];
        idx += 1;
        keep
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patcher() -> Patcher {
        Patcher::new(
            PathBuf::from("/proj/mapnik"),
            PathBuf::from("/proj/mapnik/font"),
        )
    }

    fn compiled(body: &str) -> Document {
        let xml = format!(
            r#"<Map srs="+proj=longlat" maximum-extent="-180,-90,180,90">{body}</Map>"#
        );
        Document::parse_str(&xml).unwrap()
    }

    #[test]
    fn map_attributes_rewritten() {
        let mut doc = compiled("");
        patcher().patch_document(&mut doc).unwrap();
        let root = doc.root();
        assert_eq!(root.attr("base"), Some("/proj/mapnik"));
        assert_eq!(root.attr("font-directory"), Some("/proj/mapnik/font"));
        assert_eq!(root.attr("srs"), None);
        assert_eq!(root.attr("maximum-extent"), None);
    }

    #[test]
    fn zero_width_line_rule_deleted() {
        let mut doc = compiled(
            r#"<Style name="roads">
                 <Rule><LineSymbolizer stroke-width="0"/></Rule>
                 <Rule><LineSymbolizer stroke-width="2"/></Rule>
               </Style>"#,
        );
        let report = patcher().patch_document(&mut doc).unwrap();
        let style = doc.root().children_named("Style").next().unwrap();
        assert_eq!(style.count_children_named("Rule"), 1);
        assert_eq!(report.deleted_rules, vec![("roads".to_string(), 1)]);
    }

    #[test]
    fn fractional_zero_width_is_kept() {
        let mut doc = compiled(
            r#"<Style name="roads">
                 <Rule><LineSymbolizer stroke-width="0.0"/></Rule>
               </Style>"#,
        );
        let report = patcher().patch_document(&mut doc).unwrap();
        let style = doc.root().children_named("Style").next().unwrap();
        assert_eq!(style.count_children_named("Rule"), 1);
        assert_eq!(report.total_deleted_rules(), 0);
    }

    #[test]
    fn empty_text_symbolizer_rule_deleted() {
        let mut doc = compiled(
            r#"<Style name="labels">
                 <Rule><TextSymbolizer/></Rule>
                 <Rule><TextSymbolizer>[name]</TextSymbolizer></Rule>
               </Style>"#,
        );
        let report = patcher().patch_document(&mut doc).unwrap();
        let style = doc.root().children_named("Style").next().unwrap();
        assert_eq!(style.count_children_named("Rule"), 1);
        assert_eq!(report.deleted_rules, vec![("labels".to_string(), 1)]);
    }

    #[test]
    fn whitespace_text_symbolizer_rule_kept() {
        let mut doc = compiled(
            r#"<Style name="labels">
                 <Rule><TextSymbolizer> </TextSymbolizer></Rule>
               </Style>"#,
        );
        patcher().patch_document(&mut doc).unwrap();
        let style = doc.root().children_named("Style").next().unwrap();
        assert_eq!(style.count_children_named("Rule"), 1);
    }

    #[test]
    fn empty_shield_symbolizer_rule_deleted() {
        let mut doc = compiled(
            r#"<Style name="shields">
                 <Rule><ShieldSymbolizer/></Rule>
               </Style>"#,
        );
        patcher().patch_document(&mut doc).unwrap();
        let style = doc.root().children_named("Style").next().unwrap();
        assert_eq!(style.count_children_named("Rule"), 0);
    }

    #[test]
    fn nested_symbolizer_still_dooms_rule() {
        // The symbolizer check is a descendant search, not direct children.
        let mut doc = compiled(
            r#"<Style name="roads">
                 <Rule><Group><LineSymbolizer stroke-width="0"/></Group></Rule>
               </Style>"#,
        );
        patcher().patch_document(&mut doc).unwrap();
        let style = doc.root().children_named("Style").next().unwrap();
        assert_eq!(style.count_children_named("Rule"), 0);
    }

    #[test]
    fn whole_rule_removed_not_just_symbolizer() {
        let mut doc = compiled(
            r#"<Style name="roads">
                 <Rule>
                   <Filter>[type]='path'</Filter>
                   <LineSymbolizer stroke-width="0"/>
                   <LineSymbolizer stroke-width="3"/>
                 </Rule>
               </Style>"#,
        );
        patcher().patch_document(&mut doc).unwrap();
        let style = doc.root().children_named("Style").next().unwrap();
        assert_eq!(style.children().len(), 0);
    }

    #[test]
    fn deleted_counts_reported_per_style() {
        let mut doc = compiled(
            r#"<Style name="a">
                 <Rule><LineSymbolizer stroke-width="0"/></Rule>
                 <Rule><TextSymbolizer/></Rule>
               </Style>
               <Style name="b">
                 <Rule><LineSymbolizer stroke-width="1"/></Rule>
               </Style>
               <Style name="c">
                 <Rule><ShieldSymbolizer/></Rule>
               </Style>"#,
        );
        let report = patcher().patch_document(&mut doc).unwrap();
        assert_eq!(
            report.deleted_rules,
            vec![("a".to_string(), 2), ("c".to_string(), 1)]
        );
    }

    #[test]
    fn style_without_name_is_error() {
        let mut doc = compiled("<Style><Rule/></Style>");
        let err = patcher().patch_document(&mut doc).unwrap_err();
        assert!(matches!(err, PatchError::MissingAttr { .. }));
        assert_eq!(
            format!("{err}"),
            "<Style> element is missing required attribute 'name'"
        );
    }

    #[test]
    fn layer_without_name_is_error() {
        let mut doc = compiled("<Layer><StyleName>s</StyleName></Layer>");
        let err = patcher().patch_document(&mut doc).unwrap_err();
        assert!(matches!(err, PatchError::MissingAttr { .. }));
    }

    #[test]
    fn geographic_line_layer_clears_label_cache() {
        let mut doc = compiled(
            r#"<Layer name="10m_geographicline"><StyleName>grid</StyleName></Layer>"#,
        );
        let report = patcher().patch_document(&mut doc).unwrap();
        let layer = doc.root().children_named("Layer").next().unwrap();
        assert_eq!(layer.attr("clear-label-cache"), Some("yes"));
        assert_eq!(report.label_cache_cleared, vec!["10m_geographicline"]);
    }

    #[test]
    fn multi_style_layer_gets_cache_features() {
        let mut doc = compiled(
            r#"<Layer name="roads">
                 <StyleName>casing</StyleName>
                 <StyleName>fill</StyleName>
               </Layer>"#,
        );
        let report = patcher().patch_document(&mut doc).unwrap();
        let layer = doc.root().children_named("Layer").next().unwrap();
        assert_eq!(layer.attr("cache-features"), Some("yes"));
        assert_eq!(report.feature_cached, vec!["roads"]);
    }

    #[test]
    fn single_style_layer_untouched() {
        let mut doc =
            compiled(r#"<Layer name="water"><StyleName>water</StyleName></Layer>"#);
        patcher().patch_document(&mut doc).unwrap();
        let layer = doc.root().children_named("Layer").next().unwrap();
        assert_eq!(layer.attr("cache-features"), None);
        assert_eq!(layer.attr("clear-label-cache"), None);
    }

    #[test]
    fn style_less_layer_removed() {
        let mut doc = compiled(
            r#"<Layer name="dead"/>
               <Layer name="live"><StyleName>s</StyleName></Layer>"#,
        );
        let report = patcher().patch_document(&mut doc).unwrap();
        let names: Vec<_> = doc
            .root()
            .children_named("Layer")
            .map(|l| l.attr("name").unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["live"]);
        assert_eq!(report.removed_layers, vec!["dead"]);
    }

    #[test]
    fn non_layer_siblings_survive_layer_removal() {
        let mut doc = compiled(
            r#"<Style name="s"><Rule/></Style>
               <Layer name="dead"/>"#,
        );
        patcher().patch_document(&mut doc).unwrap();
        assert_eq!(doc.root().count_children_named("Style"), 1);
        assert_eq!(doc.root().count_children_named("Layer"), 0);
    }

    #[test]
    fn patching_is_idempotent() {
        let mut doc = compiled(
            r#"<Style name="roads">
                 <Rule><LineSymbolizer stroke-width="0"/></Rule>
                 <Rule><LineSymbolizer stroke-width="2"/></Rule>
               </Style>
               <Layer name="roads"><StyleName>roads</StyleName></Layer>
               <Layer name="dead"/>"#,
        );
        let p = patcher();
        let first = p.patch_document(&mut doc).unwrap();
        assert!(first.deleted_anything());

        let before = doc.clone();
        // Second run: srs/maximum-extent already gone, nothing left to delete.
        let second = p.patch_document(&mut doc).unwrap();
        assert!(!second.deleted_anything());
        assert_eq!(doc, before);
    }

    #[test]
    fn patch_file_overwrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.xml");
        std::fs::write(
            &path,
            r#"<Map srs="+proj=merc"><Layer name="dead"/></Map>"#,
        )
        .unwrap();

        let report = patcher().patch_file(&path).unwrap();
        assert_eq!(report.removed_layers, vec!["dead"]);

        let patched = std::fs::read_to_string(&path).unwrap();
        assert!(!patched.contains("srs"));
        assert!(!patched.contains("Layer"));
        assert!(patched.contains(r#"base="/proj/mapnik""#));
    }

    #[test]
    fn malformed_document_aborts_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.xml");
        std::fs::write(&path, "<Map><Style>").unwrap();

        assert!(patcher().patch_file(&path).is_err());
        // Input left untouched.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<Map><Style>");
    }
}
