use crate::ir::{Diagram, Node, Platform, Region};
use crate::layout::path::svg_path_data;
use crate::layout::{ConnectionType, Layout, LayoutEdge};
use crate::measure::TextMetrics;
use std::fmt::Write;

const CONNECTION_TYPES: [ConnectionType; 5] = [
    ConnectionType::Internal,
    ConnectionType::External,
    ConnectionType::InterRegion,
    ConnectionType::InterPlatform,
    ConnectionType::IntraPlatform,
];

pub struct SvgRenderer {
    metrics: TextMetrics,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::default(),
        }
    }
}

impl SvgRenderer {
    pub fn render(&self, diagram: &Diagram, layout: &Layout) -> String {
        let mut svg = String::new();

        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            layout.width, layout.height, layout.min_x, layout.min_y, layout.width, layout.height
        )
        .unwrap();

        // Style
        writeln!(
            &mut svg,
            r#"<style>
  .region {{ fill: #f7f9fc; stroke: #8a9bb5; stroke-width: 1; stroke-dasharray: 6 4; }}
  .region-name {{ font-family: sans-serif; font-size: 13px; font-weight: bold; fill: #55657f; }}
  .platform {{ fill: #eef2f8; stroke: #b4c0d3; stroke-width: 1; }}
  .platform-name {{ font-family: sans-serif; font-size: 11px; fill: #55657f; }}
  .system {{ fill: #fff; stroke: #333; stroke-width: 1.5; }}
  .system-name {{ font-family: sans-serif; font-size: 12px; font-weight: bold; }}
  .function {{ font-family: sans-serif; font-size: 10px; fill: #555; }}
  .connection {{ fill: none; stroke-width: 1.5; }}
  .connection-internal {{ stroke: #8e44ad; }}
  .connection-external {{ stroke: #c0392b; stroke-dasharray: 5 3; }}
  .connection-inter-region {{ stroke: #d35400; }}
  .connection-inter-platform {{ stroke: #2980b9; }}
  .connection-intra-platform {{ stroke: #555; }}
  .connection-label {{ font-family: sans-serif; font-size: 10px; fill: #333; }}
  .connection-label-bg {{ fill: #fff; fill-opacity: 0.85; }}
</style>"#
        )
        .unwrap();

        self.render_markers(&mut svg);

        for region in &diagram.regions {
            self.render_region(&mut svg, region);
        }
        for platform in &diagram.platforms {
            self.render_platform(&mut svg, platform);
        }

        // Connections go below the boxes they attach to
        for edge in &layout.edges {
            let description = diagram
                .connections
                .get(edge.edge_index)
                .and_then(|c| c.description.as_deref());
            self.render_connection(&mut svg, edge, description);
        }

        for node in &diagram.nodes {
            self.render_node(&mut svg, node);
        }

        writeln!(&mut svg, "</svg>").unwrap();
        svg
    }

    fn render_markers(&self, svg: &mut String) {
        writeln!(svg, "<defs>").unwrap();
        for ct in CONNECTION_TYPES {
            writeln!(
                svg,
                r#"<marker id="{}" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="8" markerHeight="8" orient="auto-start-reverse"><path class="connection-{}" d="M0,0 L10,5 L0,10 z" style="fill: currentColor; stroke: none" /></marker>"#,
                marker_id(ct),
                ct.as_str()
            )
            .unwrap();
        }
        writeln!(svg, "</defs>").unwrap();
    }

    fn render_region(&self, svg: &mut String, region: &Region) {
        writeln!(
            svg,
            r#"<rect class="region" x="{}" y="{}" width="{}" height="{}" rx="8" />"#,
            region.x, region.y, region.width, region.height
        )
        .unwrap();
        writeln!(
            svg,
            r#"<text class="region-name" x="{}" y="{}">{}</text>"#,
            region.x + 8.0,
            region.y + 16.0,
            escape_xml(&region.name)
        )
        .unwrap();
    }

    fn render_platform(&self, svg: &mut String, platform: &Platform) {
        writeln!(
            svg,
            r#"<rect class="platform" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
            platform.x, platform.y, platform.width, platform.height
        )
        .unwrap();
        writeln!(
            svg,
            r#"<text class="platform-name" x="{}" y="{}">{}</text>"#,
            platform.x + 6.0,
            platform.y + 13.0,
            escape_xml(&platform.name)
        )
        .unwrap();
    }

    fn render_node(&self, svg: &mut String, node: &Node) {
        let m = &self.metrics;
        writeln!(
            svg,
            r#"<rect class="system" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
            node.x, node.y, node.width, node.height
        )
        .unwrap();

        let mut text_y = node.y + m.padding_y + m.line_height * 0.8;
        let bottom = node.y + node.height - m.padding_y;
        for line in m.fit_lines(node.display_name(), node.width) {
            if text_y > bottom {
                return;
            }
            writeln!(
                svg,
                r#"<text class="system-name" x="{}" y="{}" text-anchor="middle">{}</text>"#,
                node.x + node.width / 2.0,
                text_y,
                escape_xml(&line)
            )
            .unwrap();
            text_y += m.line_height;
        }

        for function in &node.functions {
            for line in m.fit_lines(function, node.width) {
                if text_y > bottom {
                    return;
                }
                writeln!(
                    svg,
                    r#"<text class="function" x="{}" y="{}">{}</text>"#,
                    node.x + m.padding_x,
                    text_y,
                    escape_xml(&line)
                )
                .unwrap();
                text_y += m.line_height * 0.85;
            }
        }
    }

    fn render_connection(&self, svg: &mut String, edge: &LayoutEdge, description: Option<&str>) {
        let ct = edge.connection_type;
        writeln!(
            svg,
            r#"<path class="connection connection-{}" d="{}" marker-end="url(#{})" data-source="{}" data-target="{}" data-direction="{}" data-approach="{}" />"#,
            ct.as_str(),
            svg_path_data(&edge.route.waypoints),
            marker_id(ct),
            escape_xml(&edge.source),
            escape_xml(&edge.target),
            edge.spatial.primary_direction.as_str(),
            edge.parallel.dominant_incoming_side.as_str()
        )
        .unwrap();

        if let Some(label) = description.filter(|d| !d.is_empty()) {
            let (w, h) = self.metrics.label_size(label);
            let p = edge.route.label;
            writeln!(
                svg,
                r#"<rect class="connection-label-bg" x="{}" y="{}" width="{}" height="{}" />"#,
                p.x - w / 2.0,
                p.y - h / 2.0,
                w,
                h
            )
            .unwrap();
            writeln!(
                svg,
                r#"<text class="connection-label" x="{}" y="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                p.x,
                p.y,
                escape_xml(label)
            )
            .unwrap();
        }
    }
}

fn marker_id(ct: ConnectionType) -> String {
    format!("arrow-{}", ct.as_str())
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutEngine;

    fn render(input: &str) -> String {
        let diagram = Diagram::from_json(input).unwrap();
        let layout = LayoutEngine::for_diagram(&diagram).layout(&diagram);
        SvgRenderer::default().render(&diagram, &layout)
    }

    #[test]
    fn test_render_basic() {
        let svg = render(
            r#"{ "nodes": [ { "id": "crm", "name": "Customer CRM", "x": 0, "y": 0, "width": 200, "height": 80 } ] }"#,
        );

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Customer CRM"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_render_unicode() {
        let svg = render(
            r#"{ "nodes": [ { "id": "a", "name": "顧客管理", "functions": ["請求"], "x": 0, "y": 0, "width": 200, "height": 80 } ] }"#,
        );

        assert!(svg.contains("顧客管理"));
        assert!(svg.contains("請求"));
    }

    #[test]
    fn test_render_connection() {
        let svg = render(
            r#"{
                "nodes": [
                    { "id": "a", "platform": "Cloud", "x": 0, "y": 0, "width": 200, "height": 100 },
                    { "id": "b", "platform": "Cloud", "x": 500, "y": 0, "width": 200, "height": 100 }
                ],
                "connections": [ { "source": "a", "target": "b", "description": "orders & invoices" } ]
            }"#,
        );

        assert!(svg.contains(r#"d="M200,50 L230,50 L500,50""#));
        assert!(svg.contains(r#"class="connection connection-intra-platform""#));
        assert!(svg.contains("url(#arrow-intra-platform)"));
        assert!(svg.contains("orders &amp; invoices"));
        assert!(svg.contains(r#"x="350" y="50""#));
    }

    #[test]
    fn test_external_connection_class() {
        let svg = render(
            r#"{
                "nodes": [
                    { "id": "a", "platform": "Cloud", "x": 0, "y": 0, "width": 200, "height": 100 },
                    { "id": "x", "platform": "External System", "x": 500, "y": 0, "width": 200, "height": 100 }
                ],
                "connections": [ { "source": "x", "target": "a" } ]
            }"#,
        );
        assert!(svg.contains("connection-external"));
        assert!(svg.contains(r#"data-direction="left""#));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
