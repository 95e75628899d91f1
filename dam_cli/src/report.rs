//! Plain-text rendering of a [`DamAnalysis`].

use std::fmt::{self, Write};

use dam_core::analysis::DamAnalysis;
use dam_core::forces::{ConditionStatus, ForceKind, LoadCondition};
use dam_core::stability::StressCheck;

const RULE: &str = "═══════════════════════════════════════";

/// Render the full report.
pub fn render(analysis: &DamAnalysis, title: &str) -> String {
    let mut out = String::new();
    // fmt::Write for String never fails
    let _ = write_report(&mut out, analysis, title);
    out
}

fn write_report(out: &mut String, analysis: &DamAnalysis, title: &str) -> fmt::Result {
    let g = &analysis.geometry;
    let w = &analysis.wave;

    writeln!(out, "{}", RULE)?;
    writeln!(out, "  {}", title)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;

    writeln!(out, "Dam Geometry:")?;
    writeln!(out, "  top_width:               {:>10.2} m", g.top_width_m)?;
    writeln!(out, "  effective_height:        {:>10.2} m", g.effective_height_m)?;
    writeln!(out, "  downstream_base_width:   {:>10.2} m", g.downstream_base_width_m)?;
    writeln!(out, "  upstream_base_width:     {:>10.2} m", g.upstream_base_width_m)?;
    writeln!(out, "  upstream_slope_height:   {:>10.2} m", g.upstream_slope_height_m)?;
    writeln!(out, "  dam_base_width:          {:>10.2} m", g.dam_base_width_m)?;
    writeln!(out, "  crest_elevation:         {:>10.2} m", g.crest_elevation_m)?;
    writeln!(out, "  upstream_slope_length:   {:>10.2} m", g.upstream_slope_length_m)?;
    writeln!(out, "  upstream_slope_angle:    {:>10.2} °", g.upstream_slope_angle.0)?;
    writeln!(out)?;

    writeln!(out, "Wave Characteristics ({:?}):", w.branch)?;
    writeln!(out, "  Wave Height: {:.2} m", w.wave_height_m)?;
    writeln!(out, "  Rise of Wave: {:.2} m", w.rise_of_wave_m)?;
    writeln!(out, "  Freeboard: {:.2} m", w.freeboard_m)?;
    writeln!(out, "  Wave Force Application Point: {:.2} m", w.wave_force_application_point_m)?;
    writeln!(out)?;

    writeln!(out, "Force Calculations:")?;
    writeln!(
        out,
        "  {:<4} {:<32} {:>12} {:>10} {:>14}",
        "Key", "Description", "Force (kN)", "Arm (m)", "Moment (kN·m)"
    )?;
    for kind in ForceKind::ALL {
        writeln!(
            out,
            "  {:<4} {:<32} {:>12.2} {:>10.2} {:>14.2}",
            kind.key(),
            kind.description(),
            analysis.force_model.forces.get(kind),
            analysis.force_model.lever_arms.get(kind),
            analysis.moment(kind)
        )?;
    }
    writeln!(out)?;
    for condition in LoadCondition::ALL {
        write_condition(out, analysis.conditions.get(condition))?;
    }
    writeln!(out)?;

    writeln!(out, "Sliding Check:")?;
    writeln!(out, "  {}", analysis.verdict.sliding)?;
    writeln!(out)?;

    writeln!(out, "Stress Analysis Results:")?;
    for check in analysis.verdict.stress_checks() {
        write_stress(out, check)?;
    }
    writeln!(out)?;

    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "  RESULT: {}",
        if analysis.verdict.is_safe() { "SAFE" } else { "UNSAFE" }
    )?;
    writeln!(out, "{}", RULE)?;
    Ok(())
}

fn write_condition(out: &mut String, status: &ConditionStatus) -> fmt::Result {
    write!(
        out,
        "  {:<16} ΣV = {:>10.2} kN",
        status.condition.label(),
        status.vertical_sum_kn
    )?;
    if let Some(horizontal) = status.horizontal_sum_kn {
        write!(out, "  ΣH = {:>10.2} kN", horizontal)?;
    }
    writeln!(
        out,
        "  ΣM = {:>12.2} kN·m  arm = {:.2} m",
        status.moment_sum_knm, status.lever_arm_avg_m
    )
}

fn write_stress(out: &mut String, check: &StressCheck) -> fmt::Result {
    writeln!(out, "  {}: {}", check.condition, check)?;
    let e = &check.eccentricity;
    if e.within_middle_third {
        writeln!(
            out,
            "      e = {:.3} m (within middle third, B/6 = {:.3} m)",
            e.raw_m, e.middle_third_limit_m
        )
    } else {
        writeln!(
            out,
            "      e = {:.3} m OUTSIDE middle third (B/6 = {:.3} m), stresses use e = {:.3} m",
            e.raw_m, e.middle_third_limit_m, e.clamped_m
        )
    }
}
