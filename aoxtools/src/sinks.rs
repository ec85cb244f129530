use std::{fs::File, io::Write, path::Path};

use prettytable::{
    format::{LinePosition, LineSeparator, TableFormat},
    Cell,
    Row,
    Table,
};
use spapi_tools::{AmazonOrder, ORDER_COLUMNS};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Could not write to the output sink. {0}")]
pub struct SinkError(pub String);

/// Where the finished records go. Implementations must honor the positional column contract of
/// [ORDER_COLUMNS]; the rows they receive are already in that order.
pub trait OutputSink {
    fn write(&mut self, orders: &[AmazonOrder]) -> Result<(), SinkError>;
}

//-------------------------------------------------  ConsoleSink  ------------------------------------------------------

/// Renders the records as a table on stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn write(&mut self, orders: &[AmazonOrder]) -> Result<(), SinkError> {
        if orders.is_empty() {
            println!("No orders in the selected window.");
            return Ok(());
        }
        println!("{}", order_table(orders));
        Ok(())
    }
}

fn markdown_format() -> TableFormat {
    prettytable::format::FormatBuilder::new()
        .column_separator('|')
        .borders('|')
        .separator(LinePosition::Title, LineSeparator::new('-', '|', '|', '|'))
        .padding(1, 1)
        .build()
}

pub fn order_table(orders: &[AmazonOrder]) -> Table {
    let mut table = Table::new();
    table.set_format(markdown_format());
    table.set_titles(Row::new(ORDER_COLUMNS.iter().map(|c| Cell::new(c)).collect()));
    for order in orders {
        table.add_row(Row::new(order.as_row().iter().map(|v| Cell::new(v)).collect()));
    }
    table
}

//-------------------------------------------------  CsvSink  ----------------------------------------------------------

/// Writes the records as CSV, header row first. This is the stand-in for the spreadsheet
/// deployment; any spreadsheet tool can ingest the file with the columns already in contract
/// order.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, SinkError> {
        let file = File::create(path.as_ref())
            .map_err(|e| SinkError(format!("Could not create {}. {e}", path.as_ref().display())))?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(writer: W) -> Self {
        Self { writer: csv::Writer::from_writer(writer) }
    }

    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer.into_inner().map_err(|e| SinkError(e.to_string()))
    }
}

impl<W: Write> OutputSink for CsvSink<W> {
    fn write(&mut self, orders: &[AmazonOrder]) -> Result<(), SinkError> {
        self.writer.write_record(ORDER_COLUMNS).map_err(|e| SinkError(e.to_string()))?;
        for order in orders {
            self.writer.write_record(order.as_row()).map_err(|e| SinkError(e.to_string()))?;
        }
        self.writer.flush().map_err(|e| SinkError(e.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample_orders() -> Vec<AmazonOrder> {
        vec![
            AmazonOrder {
                order_id: "X1".to_string(),
                purchase_date: "2024-01-01".to_string(),
                order_status: "Shipped".to_string(),
                order_total: "19.99".to_string(),
                payment_method: "Other".to_string(),
                marketplace_id: "ATVPDKIKX0DER".to_string(),
                shipment_service_level_category: "Standard".to_string(),
                order_type: "StandardOrder".to_string(),
            },
            AmazonOrder { order_id: "X2".to_string(), ..Default::default() },
        ]
    }

    #[test]
    fn csv_output_has_header_and_positional_rows() {
        let mut sink = CsvSink::from_writer(Vec::new());
        sink.write(&sample_orders()).unwrap();
        let bytes = sink.into_inner().unwrap();
        let csv = String::from_utf8(bytes).unwrap();
        let lines = csv.lines().collect::<Vec<&str>>();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "AmazonOrderId,PurchaseDate,OrderStatus,OrderTotal,PaymentMethod,MarketplaceId,\
             ShipmentServiceLevelCategory,OrderType"
        );
        assert_eq!(lines[1], "X1,2024-01-01,Shipped,19.99,Other,ATVPDKIKX0DER,Standard,StandardOrder");
        assert_eq!(lines[2], "X2,,,,,,,");
    }

    #[test]
    fn console_table_lists_columns_in_contract_order() {
        let table = order_table(&sample_orders()).to_string();
        let header_end = table.find('\n').unwrap();
        let header = &table[..header_end];
        let mut last = 0;
        for column in ORDER_COLUMNS {
            let at = header.find(column).unwrap_or_else(|| panic!("{column} missing from header"));
            assert!(at >= last, "{column} out of order");
            last = at;
        }
        assert!(table.contains("X1"));
        assert!(table.contains("19.99"));
    }
}
