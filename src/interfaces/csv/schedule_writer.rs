use crate::application::aggregator::PayoffEvent;
use crate::application::simulator::MonthTrace;
use crate::domain::debt::DebtId;
use crate::domain::money::Money;
use crate::domain::strategy::Strategy;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct TraceRow<'a> {
    strategy: Strategy,
    month: u32,
    debt_id: &'a DebtId,
    interest_accrued: Money,
    extra_applied: Money,
    payment_applied: Money,
    remaining_balance: Money,
}

#[derive(Serialize)]
struct TimelineRow<'a> {
    strategy: Strategy,
    debt_id: &'a DebtId,
    name: &'a str,
    month: u32,
    interest_paid: Money,
}

/// Writes payoff schedules as CSV. Amounts are rounded to cents.
pub struct ScheduleWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ScheduleWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// One row per debt per month.
    pub fn write_trace(&mut self, strategy: Strategy, trace: &[MonthTrace]) -> Result<()> {
        for month in trace {
            for entry in &month.entries {
                self.writer.serialize(TraceRow {
                    strategy,
                    month: month.month,
                    debt_id: &entry.debt_id,
                    interest_accrued: entry.interest_accrued.cents(),
                    extra_applied: entry.extra_applied.cents(),
                    payment_applied: entry.payment_applied.cents(),
                    remaining_balance: entry.remaining_balance.cents(),
                })?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }

    /// One row per retired debt, in payoff order.
    pub fn write_timeline(&mut self, strategy: Strategy, timeline: &[PayoffEvent]) -> Result<()> {
        for event in timeline {
            self.writer.serialize(TimelineRow {
                strategy,
                debt_id: &event.debt_id,
                name: &event.name,
                month: event.month,
                interest_paid: event.interest_paid.cents(),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::simulator::TraceEntry;
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_trace() {
        let trace = vec![MonthTrace {
            month: 1,
            extra_pool: Money::new(dec!(50)),
            entries: vec![
                TraceEntry {
                    debt_id: "cc".to_string(),
                    interest_accrued: Money::new(dec!(119.74375)),
                    extra_applied: Money::new(dec!(50)),
                    payment_applied: Money::new(dec!(200)),
                    remaining_balance: Money::new(dec!(5669.74375)),
                },
                TraceEntry {
                    debt_id: "auto".to_string(),
                    interest_accrued: Money::new(dec!(69.375)),
                    extra_applied: Money::ZERO,
                    payment_applied: Money::new(dec!(450)),
                    remaining_balance: Money::new(dec!(18119.375)),
                },
            ],
        }];

        let mut buffer = Vec::new();
        ScheduleWriter::new(&mut buffer)
            .write_trace(Strategy::Avalanche, &trace)
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "strategy,month,debt_id,interest_accrued,extra_applied,payment_applied,remaining_balance"
        );
        assert_eq!(lines[1], "avalanche,1,cc,119.74,50,200,5669.74");
        assert_eq!(lines[2], "avalanche,1,auto,69.38,0,450,18119.38");
    }

    #[test]
    fn test_write_timeline() {
        let timeline = vec![PayoffEvent {
            debt_id: "cc".to_string(),
            name: "Credit Card".to_string(),
            month: 31,
            interest_paid: Money::new(dec!(1520.129)),
        }];

        let mut buffer = Vec::new();
        ScheduleWriter::new(&mut buffer)
            .write_timeline(Strategy::Snowball, &timeline)
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert_eq!(
            output,
            "strategy,debt_id,name,month,interest_paid\nsnowball,cc,Credit Card,31,1520.13\n"
        );
    }
}
