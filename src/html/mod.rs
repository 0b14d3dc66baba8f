//! HTML tag generation for entry-point chunks
//!
//! Walks an entry chunk's static import graph depth-first and renders the
//! ordered tag sequence a page needs to boot that entry: stylesheet links
//! first, then the module script tag, then modulepreload hints for every
//! transitively imported chunk.
//!
//! The traversal carries no visited-set: build-tool-generated manifests are
//! acyclic and duplicate-free by construction, and a chunk reachable over
//! two paths has its tags emitted once per path. Dynamic imports are never
//! traversed.

use crate::manifest::{Chunk, Manifest, ManifestError};

/// Canonical attribute order. Fixed so rendered output is byte-stable.
const ATTR_ORDER: [&str; 4] = ["type", "src", "rel", "href"];

/// Render the newline-separated tag fragment booting `entry`.
///
/// All-or-nothing: an import key that does not resolve in `manifest` aborts
/// with [`ManifestError::MissingChunk`] and no partial fragment is returned.
pub fn render_entry(manifest: &Manifest, entry: &Chunk) -> Result<String, ManifestError> {
    let mut out = String::new();

    collect_css(&mut out, manifest, entry)?;
    write_tag(&mut out, "script", &[("type", "module"), ("src", &entry.file)]);
    collect_preload(&mut out, manifest, entry)?;

    Ok(out)
}

/// Render a bare `<script type="module">` tag. The serving layer uses this
/// shape for dev-mode entries, which carry no css or preload closure.
pub fn module_script(src: &str) -> String {
    let mut out = String::new();
    write_tag(&mut out, "script", &[("type", "module"), ("src", src)]);
    out
}

/// Emit stylesheet links for `chunk`'s own css list, then recurse into its
/// static imports in list order.
fn collect_css(out: &mut String, manifest: &Manifest, chunk: &Chunk) -> Result<(), ManifestError> {
    for path in &chunk.css {
        write_tag(out, "link", &[("rel", "stylesheet"), ("href", path)]);
    }

    for key in &chunk.imports {
        let imported = resolve(manifest, key)?;
        collect_css(out, manifest, imported)?;
    }

    Ok(())
}

/// Emit a modulepreload link per static import, recursing into each
/// import's own imports before moving to the next sibling.
fn collect_preload(
    out: &mut String,
    manifest: &Manifest,
    chunk: &Chunk,
) -> Result<(), ManifestError> {
    for key in &chunk.imports {
        let imported = resolve(manifest, key)?;
        write_tag(out, "link", &[("rel", "modulepreload"), ("href", &imported.file)]);
        collect_preload(out, manifest, imported)?;
    }

    Ok(())
}

fn resolve<'a>(manifest: &'a Manifest, key: &str) -> Result<&'a Chunk, ManifestError> {
    manifest.get(key).ok_or_else(|| ManifestError::MissingChunk {
        key: key.to_string(),
    })
}

/// Write one tag with its attributes in canonical order, followed by a
/// newline. Attributes absent from `attrs` are skipped.
fn write_tag(out: &mut String, tag: &str, attrs: &[(&str, &str)]) {
    out.push('<');
    out.push_str(tag);

    for name in ATTR_ORDER {
        if let Some((_, value)) = attrs.iter().find(|(attr, _)| *attr == name) {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }

    if tag == "script" {
        out.push_str("></script>");
    } else {
        out.push_str("/>");
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::manifest::fixtures::sample;

    #[test]
    fn test_render_bar_entry() {
        let manifest = sample();
        let bar = manifest.get("views/bar.js").unwrap();

        let fragment = render_entry(&manifest, bar).unwrap();
        assert_eq!(
            fragment,
            "<link rel=\"stylesheet\" href=\"assets/shared-ChJ_j-JJ.css\"/>\n\
             <script type=\"module\" src=\"assets/bar-gkvgaI9m.js\"></script>\n\
             <link rel=\"modulepreload\" href=\"assets/shared-B7PI925R.js\"/>\n"
        );
    }

    #[test]
    fn test_render_foo_entry() {
        let manifest = sample();
        let foo = manifest.get("views/foo.js").unwrap();

        let fragment = render_entry(&manifest, foo).unwrap();
        assert_eq!(
            fragment,
            "<link rel=\"stylesheet\" href=\"assets/foo-5UjPuW-k.css\"/>\n\
             <link rel=\"stylesheet\" href=\"assets/shared-ChJ_j-JJ.css\"/>\n\
             <script type=\"module\" src=\"assets/foo-BRBmoGS9.js\"></script>\n\
             <link rel=\"modulepreload\" href=\"assets/shared-B7PI925R.js\"/>\n"
        );
    }

    #[test]
    fn test_dynamic_imports_are_ignored() {
        let manifest = sample();
        let bar = manifest.get("views/bar.js").unwrap();

        let fragment = render_entry(&manifest, bar).unwrap();
        assert!(!fragment.contains("baz"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let manifest = sample();
        let foo = manifest.get("views/foo.js").unwrap();

        let first = render_entry(&manifest, foo).unwrap();
        let second = render_entry(&manifest, foo).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_import_aborts_with_key() {
        let json = r#"
        {
          "main.js": {
            "file": "assets/main.js",
            "isEntry": true,
            "imports": ["gone.js"]
          }
        }
        "#;
        let manifest = crate::manifest::Manifest::parse(json.as_bytes()).unwrap();
        let entry = manifest.get("main.js").unwrap();

        let err = render_entry(&manifest, entry).unwrap_err();
        match err {
            ManifestError::MissingChunk { key } => assert_eq!(key, "gone.js"),
            other => panic!("expected MissingChunk, got {:?}", other),
        }
    }

    #[test]
    fn test_diamond_graph_duplicates_tags() {
        // main imports a and b, both import shared; shared's css and
        // preload appear once per reachable path.
        let json = r#"
        {
          "main.js": {
            "file": "assets/main.js",
            "isEntry": true,
            "imports": ["a.js", "b.js"]
          },
          "a.js": { "file": "assets/a.js", "imports": ["shared.js"] },
          "b.js": { "file": "assets/b.js", "imports": ["shared.js"] },
          "shared.js": { "file": "assets/shared.js", "css": ["assets/shared.css"] }
        }
        "#;
        let manifest = crate::manifest::Manifest::parse(json.as_bytes()).unwrap();
        let entry = manifest.get("main.js").unwrap();

        let fragment = render_entry(&manifest, entry).unwrap();
        assert_eq!(
            fragment,
            "<link rel=\"stylesheet\" href=\"assets/shared.css\"/>\n\
             <link rel=\"stylesheet\" href=\"assets/shared.css\"/>\n\
             <script type=\"module\" src=\"assets/main.js\"></script>\n\
             <link rel=\"modulepreload\" href=\"assets/a.js\"/>\n\
             <link rel=\"modulepreload\" href=\"assets/shared.js\"/>\n\
             <link rel=\"modulepreload\" href=\"assets/b.js\"/>\n\
             <link rel=\"modulepreload\" href=\"assets/shared.js\"/>\n"
        );
    }

    #[test]
    fn test_module_script_shape() {
        assert_eq!(
            module_script("http://localhost:5173/src/main.js"),
            "<script type=\"module\" src=\"http://localhost:5173/src/main.js\"></script>\n"
        );
    }
}
