use std::fmt::Write;

use crate::data::VinReport;

/// Renders a report as a short, human readable text.
#[must_use]
pub fn render(report: &VinReport) -> String {
    let mut out = String::new();
    // Writing into a String can't fail.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &VinReport) -> std::fmt::Result {
    let vehicle = report.gibdd.as_ref().and_then(|g| g.vehicle.as_ref());
    match vehicle {
        Some(vehicle) => writeln!(
            out,
            "{} ({}), VIN {}",
            or_unknown(&vehicle.model),
            or_unknown(&vehicle.year),
            or_unknown(&vehicle.vin)
        )?,
        None => writeln!(out, "No vehicle data")?,
    }

    writeln!(out, "Owners:       {}", report.owners_count)?;
    writeln!(out, "Restricted:   {}", yes_no(report.has_restriction))?;
    writeln!(out, "Wanted:       {}", yes_no(report.is_wanted))?;
    writeln!(out, "Accidents:    {}", yes_no(report.has_accidents))?;
    writeln!(
        out,
        "Fines:        {} ({:.2} total)",
        yes_no(report.has_fines),
        report.fines_amount
    )?;

    if let Some(restrict) = &report.restrict {
        for r in &restrict.restrictions {
            writeln!(
                out,
                "  restriction {} {}: {}",
                or_unknown(&r.ogrdate),
                or_unknown(&r.regname),
                or_unknown(&r.osn)
            )?;
        }
    }
    if let Some(wanted) = &report.wanted {
        for w in &wanted.records {
            writeln!(
                out,
                "  wanted {} {}: {}",
                or_unknown(&w.date),
                or_unknown(&w.regname),
                or_unknown(&w.reason)
            )?;
        }
    }
    if let Some(dtp) = &report.dtp {
        for a in &dtp.accidents {
            writeln!(
                out,
                "  accident {} {}: {}, {}",
                or_unknown(&a.date),
                or_unknown(&a.region),
                or_unknown(&a.accident_type),
                or_unknown(&a.damage)
            )?;
        }
    }
    if let Some(fines) = &report.fines {
        for f in &fines.fines {
            writeln!(
                out,
                "  fine {} {}: {:.2} ({})",
                or_unknown(&f.date),
                or_unknown(&f.article),
                f.amount,
                or_unknown(&f.status)
            )?;
        }
    }
    if let Some(eaisto) = &report.eaisto {
        for i in &eaisto.records {
            writeln!(
                out,
                "  inspection {} at {}: {}, odometer {}",
                or_unknown(&i.date),
                or_unknown(&i.station),
                or_unknown(&i.result),
                or_unknown(&i.odometer)
            )?;
        }
    }

    Ok(())
}

fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("unknown")
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
