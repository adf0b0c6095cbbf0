use std::collections::BTreeMap;

use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text};

use crate::color::{CategoryColors, salary_ramp};
use crate::data::aggregate::{
    self, DEFAULT_HISTOGRAM_BUCKETS, DEFAULT_TOP_ROLES, HistogramBucket,
};
use crate::data::model::SalaryRecord;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 240.0;

// ---------------------------------------------------------------------------
// Central panel – metrics, charts, detail table
// ---------------------------------------------------------------------------

/// Render the dashboard in the central panel. Every aggregation is
/// recomputed from the current filtered view; nothing is cached between
/// frames.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a salary file to explore it  (File → Open…)");
        });
        return;
    }

    let mut pending_role: Option<String> = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            pending_role = dashboard(ui, state);
        });

    // Apply the role change after the immutable view borrows are gone.
    if let Some(role) = pending_role {
        state.set_country_role(role);
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) -> Option<String> {
    let Some(ds) = &state.dataset else {
        return None;
    };
    let view = state.visible_records();
    let roles = ds.distinct_roles();
    let current_role = state.country_role.as_deref();

    ui.heading("Salary Analysis");
    ui.label("Annual salaries across data careers.");
    ui.separator();

    // ---- KPI row ----
    ui.strong("General metrics (annual salary in USD)");
    ui.add_space(4.0);
    let metrics = aggregate::summary_metrics(&view);
    ui.columns(4, |cols: &mut [Ui]| {
        metric_tile(&mut cols[0], "Mean Salary", &format_usd(metrics.mean_salary));
        metric_tile(&mut cols[1], "Max Salary", &format_usd(metrics.max_salary));
        metric_tile(&mut cols[2], "Records", &metrics.count.to_string());
        let modal = if metrics.modal_role.is_empty() {
            "—"
        } else {
            metrics.modal_role.as_str()
        };
        metric_tile(&mut cols[3], "Most Common Role", modal);
    });
    ui.separator();

    // ---- Chart grid ----
    let top_roles = aggregate::top_roles_by_mean_salary(&view, DEFAULT_TOP_ROLES);
    let buckets = aggregate::salary_histogram_buckets(&view, DEFAULT_HISTOGRAM_BUCKETS);
    let remote = aggregate::remote_status_distribution(&view);

    ui.columns(2, |cols: &mut [Ui]| {
        top_roles_chart(&mut cols[0], &top_roles);
        histogram_chart(&mut cols[1], &buckets);
    });
    ui.add_space(8.0);

    let mut pending_role = None;
    ui.columns(2, |cols: &mut [Ui]| {
        donut_chart(&mut cols[0], &remote);
        pending_role = country_chart(&mut cols[1], &roles, current_role, &view);
    });

    ui.separator();
    ui.strong("Detailed data");
    ui.add_space(4.0);
    detail_table(ui, &view);

    pending_role
}

fn metric_tile(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).small());
        ui.label(RichText::new(value).size(20.0).strong());
    });
}

fn no_data(ui: &mut Ui) {
    ui.label(RichText::new("No data to display.").italics());
}

// ---------------------------------------------------------------------------
// Top roles – horizontal bar chart, largest at the top
// ---------------------------------------------------------------------------

fn top_roles_chart(ui: &mut Ui, top_roles: &[(String, f64)]) {
    ui.strong("Top 10 roles by mean salary");
    if top_roles.is_empty() {
        no_data(ui);
        return;
    }

    // Input is ascending by mean, so the last (largest) bar sits highest.
    let bars: Vec<Bar> = top_roles
        .iter()
        .enumerate()
        .map(|(i, (role, mean))| Bar::new(i as f64, *mean).width(0.6).name(role))
        .collect();
    let max_mean = top_roles.last().map(|(_, m)| *m).unwrap_or(0.0);

    Plot::new("top_roles")
        .height(CHART_HEIGHT)
        .show_axes([true, false])
        .show_grid([true, false])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_label("Mean salary (USD)")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().color(Color32::LIGHT_BLUE));
            for (i, (role, _)) in top_roles.iter().enumerate() {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(max_mean * 0.02, i as f64),
                        RichText::new(role.as_str()).size(11.0),
                    )
                    .anchor(Align2::LEFT_CENTER)
                    .color(Color32::WHITE),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Salary histogram
// ---------------------------------------------------------------------------

fn histogram_chart(ui: &mut Ui, buckets: &[HistogramBucket]) {
    ui.strong("Salary distribution");
    if buckets.is_empty() {
        no_data(ui);
        return;
    }

    let bars: Vec<Bar> = buckets
        .iter()
        .map(|b| {
            let center = (b.range_low + b.range_high) / 2.0;
            let width = (b.range_high - b.range_low).max(1.0);
            Bar::new(center, b.count as f64).width(width)
        })
        .collect();

    Plot::new("salary_hist")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_label("Salary range (USD)")
        .y_axis_label("Records")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
        });
}

// ---------------------------------------------------------------------------
// Remote-status share – painter-drawn donut
// ---------------------------------------------------------------------------

fn donut_chart(ui: &mut Ui, dist: &BTreeMap<String, usize>) {
    ui.strong("Remote work share");
    let total: usize = dist.values().sum();
    if total == 0 {
        no_data(ui);
        return;
    }

    let colors = CategoryColors::new(dist.keys().map(|s| s.as_str()));

    let size = ui.available_width().min(CHART_HEIGHT);
    let (rect, _) = ui.allocate_exact_size(Vec2::new(ui.available_width(), size), Sense::hover());
    let painter = ui.painter().with_clip_rect(rect);
    let center = rect.center();
    let outer = size * 0.45;
    let inner = outer * 0.5;

    // Ring segments built from small convex quads; start at 12 o'clock,
    // sweeping clockwise.
    let mut angle = -std::f32::consts::FRAC_PI_2;
    for (label, &count) in dist {
        let sweep = count as f32 / total as f32 * std::f32::consts::TAU;
        let color = colors.color_for(label);
        let steps = ((sweep / 0.05).ceil() as usize).max(1);
        for s in 0..steps {
            let a0 = angle + sweep * s as f32 / steps as f32;
            let a1 = angle + sweep * (s + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![
                    center + outer * Vec2::new(a0.cos(), a0.sin()),
                    center + outer * Vec2::new(a1.cos(), a1.sin()),
                    center + inner * Vec2::new(a1.cos(), a1.sin()),
                    center + inner * Vec2::new(a0.cos(), a0.sin()),
                ],
                color,
                Stroke::NONE,
            ));
        }

        let mid = angle + sweep / 2.0;
        let r = (inner + outer) / 2.0;
        painter.text(
            center + r * Vec2::new(mid.cos(), mid.sin()),
            Align2::CENTER_CENTER,
            format!("{:.0}%", 100.0 * count as f32 / total as f32),
            FontId::proportional(11.0),
            Color32::WHITE,
        );
        angle += sweep;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (label, &count) in dist {
            ui.label(
                RichText::new(format!("⏺ {label} ({count})")).color(colors.color_for(label)),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Mean salary by country for a selected role
// ---------------------------------------------------------------------------

fn country_chart(
    ui: &mut Ui,
    roles: &[String],
    current: Option<&str>,
    view: &[&SalaryRecord],
) -> Option<String> {
    let mut changed: Option<String> = None;
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Mean salary by country");
        egui::ComboBox::from_id_salt("country_role")
            .selected_text(current.unwrap_or("—"))
            .show_ui(ui, |ui: &mut Ui| {
                for role in roles {
                    if ui
                        .selectable_label(current == Some(role.as_str()), role)
                        .clicked()
                    {
                        changed = Some(role.clone());
                    }
                }
            });
    });

    let Some(role) = changed.clone().or_else(|| current.map(String::from)) else {
        no_data(ui);
        return None;
    };
    let by_country = aggregate::mean_salary_by_country(view, &role);
    if by_country.is_empty() {
        no_data(ui);
        return changed;
    }

    let mut ranked: Vec<(&String, f64)> = by_country.iter().map(|(c, m)| (c, *m)).collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    let lo = ranked.first().map(|(_, m)| *m).unwrap_or(0.0);
    let hi = ranked.last().map(|(_, m)| *m).unwrap_or(0.0);
    let span = (hi - lo).max(f64::EPSILON);

    let bars: Vec<Bar> = ranked
        .iter()
        .enumerate()
        .map(|(i, (country, mean))| {
            Bar::new(i as f64, *mean)
                .width(0.6)
                .name(country.as_str())
                .fill(salary_ramp((mean - lo) / span))
        })
        .collect();

    Plot::new("salary_by_country")
        .height(CHART_HEIGHT)
        .show_axes([true, false])
        .show_grid([true, false])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_label("Mean salary (USD)")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
            for (i, (country, _)) in ranked.iter().enumerate() {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(hi * 0.02, i as f64),
                        RichText::new(country.as_str()).size(10.0),
                    )
                    .anchor(Align2::LEFT_CENTER)
                    .color(Color32::WHITE),
                );
            }
        });

    changed
}

// ---------------------------------------------------------------------------
// Detail table of the filtered view
// ---------------------------------------------------------------------------

fn detail_table(ui: &mut Ui, view: &[&SalaryRecord]) {
    use egui_extras::{Column, TableBuilder};

    if view.is_empty() {
        no_data(ui);
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true), 7)
        .column(Column::remainder())
        .max_scroll_height(320.0)
        .header(20.0, |mut header| {
            for title in [
                "Year",
                "Seniority",
                "Contract",
                "Company Size",
                "Role",
                "Remote",
                "Country",
                "Salary (USD)",
            ] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, view.len(), |mut row| {
                let rec = view[row.index()];
                row.col(|ui| {
                    ui.label(rec.year.to_string());
                });
                row.col(|ui| {
                    ui.label(&rec.seniority);
                });
                row.col(|ui| {
                    ui.label(&rec.contract_type);
                });
                row.col(|ui| {
                    ui.label(&rec.company_size);
                });
                row.col(|ui| {
                    ui.label(&rec.role);
                });
                row.col(|ui| {
                    ui.label(&rec.remote_status);
                });
                row.col(|ui| {
                    ui.label(&rec.residence_country);
                });
                row.col(|ui| {
                    ui.label(format_usd(rec.salary_usd));
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Dollar amount with thousands separators, e.g. `$115,000.00`.
fn format_usd(v: f64) -> String {
    let s = format!("{v:.2}");
    let (int_part, frac) = s.split_once('.').unwrap_or((s.as_str(), "00"));
    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}.{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_formatting_groups_thousands() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(950.5), "$950.50");
        assert_eq!(format_usd(115_000.0), "$115,000.00");
        assert_eq!(format_usd(1_234_567.891), "$1,234,567.89");
    }
}
