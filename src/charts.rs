use crate::app::{DaqView, Message};
use crate::samples::SampleSliceExt;
use plotters::chart::ChartBuilder;
use plotters::series::LineSeries;
use plotters::style::{RGBColor, BLUE, RED};
use plotters_iced::{Chart, DrawingBackend};

// Chart types
pub struct PressureChartType<'a> {
    pub state: &'a DaqView,
}

pub struct TemperatureChartType<'a> {
    pub state: &'a DaqView,
}

/// Pad a value range so flat signals still render with a visible axis span.
fn padded(range: Option<(f64, f64)>) -> (f64, f64) {
    let (min, max) = range.unwrap_or((0.0, 1.0));
    let pad = ((max - min) * 0.1).max(0.5);
    (min - pad, max + pad)
}

/// Index range for the x-axis; widened when the window has a single sample.
fn index_range(range: Option<(u64, u64)>) -> (u64, u64) {
    let (min, max) = range.unwrap_or((0, 1));
    (min, max.max(min + 1))
}

// Pressure Chart
impl<'a> Chart<Message> for PressureChartType<'a> {
    type State = ();

    fn build_chart<DB: DrawingBackend>(&self, _state: &Self::State, mut builder: ChartBuilder<DB>) {
        let samples = self.state.samples.as_slice();

        let (min_index, max_index) = index_range(samples.min_max_index());
        let (min_psi, max_psi) = padded(samples.min_max_pressure());

        let mut chart = builder
            .margin(15)
            .caption("Pressure (PSI)", ("sans-serif", 20))
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(min_index..max_index, min_psi..max_psi)
            .expect("Failed to build chart");

        chart
            .plotting_area()
            .fill(&RGBColor(245, 245, 240))
            .expect("Failed to fill background");

        chart
            .configure_mesh()
            .axis_style(RGBColor(60, 60, 60))
            .draw()
            .expect("Failed to draw mesh");

        chart
            .draw_series(LineSeries::new(
                samples.iter().map(|s| (s.index, s.pressure_psi)),
                &BLUE,
            ))
            .expect("Failed to draw series");
    }
}

// Temperature Chart
impl<'a> Chart<Message> for TemperatureChartType<'a> {
    type State = ();

    fn build_chart<DB: DrawingBackend>(&self, _state: &Self::State, mut builder: ChartBuilder<DB>) {
        let samples = self.state.samples.as_slice();

        let (min_index, max_index) = index_range(samples.min_max_index());
        let (min_temp, max_temp) = padded(samples.min_max_temperature());

        let mut chart = builder
            .margin(15)
            .caption("Temperature (°F)", ("sans-serif", 20))
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(min_index..max_index, min_temp..max_temp)
            .expect("Failed to build chart");

        chart
            .plotting_area()
            .fill(&RGBColor(245, 245, 240))
            .expect("Failed to fill background");

        chart
            .configure_mesh()
            .axis_style(RGBColor(60, 60, 60))
            .draw()
            .expect("Failed to draw mesh");

        chart
            .draw_series(LineSeries::new(
                samples.iter().map(|s| (s.index, s.temperature_f)),
                &RED,
            ))
            .expect("Failed to draw series");
    }
}
