use std::error::Error;

use clap::ValueEnum;
use tabled::settings::{Panel, Style};
use tabled::{Table, Tabled};

use crate::drivers::switch_pro::{
    encoder::{Report, ReportEncoder},
    hid_report::PackedInputDataReport,
    report_descriptor::REPORT_DESCRIPTOR,
};

use super::state::StateArgs;

/// Number of bytes per line when printing hex dumps
const BYTES_PER_LINE: usize = 16;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    /// Space separated hex bytes
    Hex,
    /// A Rust constant
    Rust,
}

#[derive(Tabled)]
struct ReportFieldRow {
    #[tabled(rename = "Byte")]
    byte: usize,
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn handle_descriptor(format: DescriptorFormat) -> Result<(), Box<dyn Error>> {
    let descriptor = format_descriptor(&REPORT_DESCRIPTOR, format);
    println!("{descriptor}");
    Ok(())
}

pub fn handle_encode(args: StateArgs) -> Result<(), Box<dyn Error>> {
    let state = args.into_input_state(None)?;
    let mut encoder = ReportEncoder::new();
    state.apply(&mut encoder);

    let report = encoder.current_report();
    let decoded = encoder.decode()?;

    let mut table = Table::new(report_rows(&report, &decoded));
    table
        .with(Style::modern_rounded())
        .with(Panel::header("Input Report"));
    println!("{table}");
    println!("{}", format_hex(&report));

    Ok(())
}

/// Format bytes as lines of space separated hex values
pub fn format_hex(data: &[u8]) -> String {
    data.chunks(BYTES_PER_LINE)
        .map(|line| {
            line.iter()
                .map(|byte| format!("{byte:02x}"))
                .collect::<Vec<String>>()
                .join(" ")
        })
        .collect::<Vec<String>>()
        .join("\n")
}

pub fn format_descriptor(descriptor: &[u8], format: DescriptorFormat) -> String {
    match format {
        DescriptorFormat::Hex => format_hex(descriptor),
        DescriptorFormat::Rust => {
            let body = descriptor
                .chunks(BYTES_PER_LINE)
                .map(|line| {
                    let bytes: Vec<String> =
                        line.iter().map(|byte| format!("{byte:#04x},")).collect();
                    format!("    {}", bytes.join(" "))
                })
                .collect::<Vec<String>>()
                .join("\n");
            format!(
                "pub const REPORT_DESCRIPTOR: [u8; {}] = [\n{body}\n];",
                descriptor.len()
            )
        }
    }
}

fn report_rows(report: &Report, decoded: &PackedInputDataReport) -> Vec<ReportFieldRow> {
    let (lx, ly, rx, ry) = (
        decoded.joystick_l_x,
        decoded.joystick_l_y,
        decoded.joystick_r_x,
        decoded.joystick_r_y,
    );
    let buttons = decoded.buttons();
    vec![
        ReportFieldRow {
            byte: 0,
            field: "Buttons",
            value: format!("{:#04x} {buttons}", report[0]),
        },
        ReportFieldRow {
            byte: 1,
            field: "Buttons",
            value: format!("{:#04x}", report[1]),
        },
        ReportFieldRow {
            byte: 2,
            field: "Hat",
            value: format!("{:#04x} {}", report[2], decoded.hat),
        },
        ReportFieldRow {
            byte: 3,
            field: "Left Stick X",
            value: lx.to_string(),
        },
        ReportFieldRow {
            byte: 4,
            field: "Left Stick Y",
            value: ly.to_string(),
        },
        ReportFieldRow {
            byte: 5,
            field: "Right Stick X",
            value: rx.to_string(),
        },
        ReportFieldRow {
            byte: 6,
            field: "Right Stick Y",
            value: ry.to_string(),
        },
        ReportFieldRow {
            byte: 7,
            field: "Vendor",
            value: format!("{:#04x}", decoded.vendor),
        },
    ]
}
