//! JSON output.
//!
//! ```text
//! {
//!   "Field": { "NumWells": 5, "Properties": { "TIME": [..], "FGPT": [..], .. } },
//!   "Wells": [ { "NumPerforations": 1, "IsInjector": 0, "Properties": { "TIME": [..], "WBHP": [..], .. } }, .. ]
//! }
//! ```
//!
//! Note: `FOPR` holds the field *gas* production rate and `FGPR` the *oil* production rate.
//! Existing consumers of this format depend on the swapped labels, so they are kept. The CSV
//! output labels these columns correctly.

use std::io::Write;

use ndarray::Array1;
use serde::Serialize;

use super::{FieldTotals, SummaryWriter};
use crate::phase::Phase;
use crate::summary::{Summary, Well};

fn series(a: &Array1<f64>) -> Vec<f64> {
    a.to_vec()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "UPPERCASE")]
struct FieldProperties {
    time: Vec<f64>,
    fgpt: Vec<f64>,
    fopt: Vec<f64>,
    fwpt: Vec<f64>,
    fopr: Vec<f64>,
    fgpr: Vec<f64>,
    fwpr: Vec<f64>,
    fgit: Vec<f64>,
    fgir: Vec<f64>,
    foit: Vec<f64>,
    foir: Vec<f64>,
    fwit: Vec<f64>,
    fwir: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Field {
    num_wells: usize,
    properties: FieldProperties,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "UPPERCASE")]
struct WellProperties {
    time: Vec<f64>,
    wbhp: Vec<f64>,
    wgr: Vec<f64>,
    wor: Vec<f64>,
    wwr: Vec<f64>,
    wgt: Vec<f64>,
    wot: Vec<f64>,
    wwt: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct WellEntry {
    num_perforations: usize,
    is_injector: u8,
    properties: WellProperties,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Document {
    field: Field,
    wells: Vec<WellEntry>,
}

impl Field {
    fn new(summary: &Summary, totals: &FieldTotals) -> Field {
        use Phase::*;

        let prod_r = &totals.production_rates;
        let prod_c = &totals.production_cumulatives;
        let inj_r = &totals.injection_rates;
        let inj_c = &totals.injection_cumulatives;

        Field {
            num_wells: summary.num_wells(),
            properties: FieldProperties {
                time: series(summary.time_steps()),
                fgpt: series(&prod_c[Gas]),
                fopt: series(&prod_c[Oil]),
                fwpt: series(&prod_c[Water]),
                fopr: series(&prod_r[Gas]),
                fgpr: series(&prod_r[Oil]),
                fwpr: series(&prod_r[Water]),
                fgit: series(&inj_c[Gas]),
                fgir: series(&inj_r[Gas]),
                foit: series(&inj_c[Oil]),
                foir: series(&inj_r[Oil]),
                fwit: series(&inj_c[Water]),
                fwir: series(&inj_r[Water]),
            },
        }
    }
}

impl WellEntry {
    fn new(well: &Well, time: &Array1<f64>) -> WellEntry {
        use Phase::*;

        WellEntry {
            num_perforations: well.num_perforations(),
            is_injector: well.is_injector() as u8,
            properties: WellProperties {
                time: series(time),
                wbhp: series(well.bhp()),
                wgr: series(&well.rate(Gas)),
                wor: series(&well.rate(Oil)),
                wwr: series(&well.rate(Water)),
                wgt: series(&well.cumulative(Gas)),
                wot: series(&well.cumulative(Oil)),
                wwt: series(&well.cumulative(Water)),
            },
        }
    }
}

/// Writes the summary as a single JSON object.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonWriter;

impl SummaryWriter for JsonWriter {
    fn write<W: Write>(&self, summary: &Summary, out: W) -> Result<(), anyhow::Error> {
        let totals = FieldTotals::compute(summary);

        let doc = Document {
            field: Field::new(summary, &totals),
            wells: summary
                .wells()
                .iter()
                .map(|w| WellEntry::new(w, summary.time_steps()))
                .collect(),
        };

        serde_json::to_writer(out, &doc)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::five_spot_like;
    use serde_json::Value;

    fn to_value(s: &Summary) -> Value {
        let mut buf = Vec::new();
        JsonWriter.write(s, &mut buf).unwrap();
        serde_json::from_slice(&buf).unwrap()
    }

    fn floats(v: &Value) -> Vec<f64> {
        v.as_array()
            .unwrap()
            .iter()
            .map(|x| x.as_f64().unwrap())
            .collect()
    }

    #[test]
    fn document_shape() {
        let s = Summary::from_source(&mut five_spot_like()).unwrap();
        let v = to_value(&s);

        assert_eq!(v["Field"]["NumWells"], 4);
        assert_eq!(v["Wells"].as_array().unwrap().len(), 4);

        let props = v["Field"]["Properties"].as_object().unwrap();
        assert_eq!(props.len(), 13);
        assert_eq!(floats(&props["TIME"]), s.time_steps().to_vec());

        let w1 = &v["Wells"][1];
        assert_eq!(w1["NumPerforations"], 1);
        assert_eq!(w1["IsInjector"], 1);
        assert_eq!(v["Wells"][0]["IsInjector"], 0);
        assert_eq!(
            w1["Properties"].as_object().unwrap().keys().collect::<Vec<_>>().len(),
            8
        );
        assert_eq!(
            floats(&w1["Properties"]["WWT"]),
            s.well(1).unwrap().cumulative(Phase::Water).to_vec()
        );
    }

    #[test]
    fn production_rate_labels_are_swapped() {
        let s = Summary::from_source(&mut five_spot_like()).unwrap();
        let v = to_value(&s);
        let props = &v["Field"]["Properties"];

        assert_eq!(floats(&props["FOPR"]), s.production_rate(Phase::Gas).to_vec());
        assert_eq!(floats(&props["FGPR"]), s.production_rate(Phase::Oil).to_vec());
        assert_eq!(floats(&props["FOPT"]), s.production_cumulative(Phase::Oil).to_vec());
    }

    #[test]
    fn key_order() {
        let s = Summary::from_source(&mut five_spot_like()).unwrap();
        let mut buf = Vec::new();
        JsonWriter.write(&s, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let keys = [
            "\"TIME\"", "\"FGPT\"", "\"FOPT\"", "\"FWPT\"", "\"FOPR\"", "\"FGPR\"", "\"FWPR\"",
            "\"FGIT\"", "\"FGIR\"", "\"FOIT\"", "\"FOIR\"", "\"FWIT\"", "\"FWIR\"",
        ];
        let at: Vec<usize> = keys.iter().map(|k| text.find(k).unwrap()).collect();
        assert!(at.windows(2).all(|w| w[0] < w[1]));
        assert!(text.starts_with("{\"Field\":{\"NumWells\":4,\"Properties\":"));
    }
}
