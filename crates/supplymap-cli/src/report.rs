//! Plain-text rendering of a scene.

use std::io::{self, Write};
use supplymap_core::ViewKind;
use supplymap_graph::Scene;
use supplymap_graph::style::format_percent;

fn hint(view: ViewKind) -> &'static str {
    match view {
        ViewKind::Partnership => "Click on any partner to view traded items and key relationships",
        ViewKind::Products => "Hover over items to view suppliers and connected items",
    }
}

fn title(view: ViewKind) -> &'static str {
    match view {
        ViewKind::Partnership => "Partnership Network Map",
        ViewKind::Products => "Product Shortage Map",
    }
}

pub fn write_scene<W: Write>(out: &mut W, scene: &Scene) -> io::Result<()> {
    writeln!(
        out,
        "{} (zoom {:.1}, {} entities, {} connections)",
        title(scene.view),
        scene.zoom,
        scene.nodes.len(),
        scene.edges.len()
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "  {:<6} {:<28} {:>6} {:>8} {:>5}  {}",
        "ID", "NAME", "SIZE", "OPACITY", "Z", "STOCK"
    )?;
    for node in &scene.nodes {
        let stock = node
            .indicator
            .as_ref()
            .map(|i| i.text.as_str())
            .unwrap_or("");
        writeln!(
            out,
            "  {:<6} {:<28} {:>6.2} {:>8.1} {:>5}  {}",
            node.id, node.name, node.bubble.size, node.bubble.opacity, node.bubble.z_index, stock
        )?;
    }

    if !scene.edges.is_empty() {
        writeln!(out)?;
        writeln!(out, "Connections:")?;
        for edge in &scene.edges {
            writeln!(
                out,
                "  {} -> {}  {:<24} {} w{} opacity {:.1}{}",
                edge.from,
                edge.to,
                edge.title,
                edge.color.to_hex(),
                edge.width,
                edge.opacity,
                if edge.dash.is_some() { " dashed" } else { "" }
            )?;
        }
    }

    writeln!(out)?;
    match &scene.detail {
        Some(detail) => {
            writeln!(out, "{} [{}]", detail.title, detail.badge.label)?;
            if !detail.details.is_empty() {
                writeln!(out, "  {}", detail.details)?;
            }
            if !detail.traded_items.is_empty() {
                writeln!(out, "  Top Traded Items:")?;
                for item in &detail.traded_items {
                    writeln!(
                        out,
                        "    {:<28} {}% shortage{}  {}",
                        item.name,
                        format_percent(item.shortage_percent),
                        if item.alert { " !" } else { "" },
                        item.reorder_href
                    )?;
                }
            }
            if !detail.suppliers.is_empty() {
                writeln!(out, "  Suppliers:")?;
                for supplier in &detail.suppliers {
                    writeln!(
                        out,
                        "    {:<28} {}% available{}  {}",
                        supplier.name,
                        format_percent(supplier.availability),
                        if supplier.low_availability { " !" } else { "" },
                        supplier.reorder_href
                    )?;
                }
            }
            if !detail.relationships.is_empty() {
                writeln!(out, "  Key Relationships:")?;
                for rel in &detail.relationships {
                    let strength = rel
                        .strength
                        .map(|s| format!("{}%", format_percent(s)))
                        .unwrap_or_else(|| rel.kind.label().to_string());
                    writeln!(out, "    {:<28} {}", rel.name, strength)?;
                }
            }
        }
        None => writeln!(out, "{}", hint(scene.view))?,
    }

    if !scene.data_sources.is_empty() {
        writeln!(out)?;
        writeln!(out, "Data sources:")?;
        for source in &scene.data_sources {
            writeln!(out, "  {} ({})  {}", source.name, source.year, source.url)?;
        }
    }

    Ok(())
}
