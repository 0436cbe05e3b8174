//! Demo data set the console starts with

use rust_decimal::Decimal;
use uuid::Uuid;

use super::{Catalog, InventoryLedger, ProductionConsole};
use crate::error::WorkflowResult;
use crate::models::{
    BomEntry, InventoryRecord, Material, NewPrinter, NewWorker, Printer, PrinterCapabilities,
    PrinterType, Product, Shift, UnitOfMeasure, Worker,
};

fn product(name: &str, production_rate: u32) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        production_rate,
    }
}

fn material(name: &str, unit: UnitOfMeasure) -> Material {
    Material {
        id: Uuid::new_v4(),
        name: name.to_string(),
        unit,
    }
}

fn line(product: &Product, material: &Material, quantity_per_unit: Decimal) -> BomEntry {
    BomEntry {
        product_id: product.id,
        material_id: material.id,
        quantity_per_unit,
    }
}

fn printer(name: &str, printer_type: PrinterType, size: &str, color: bool, capacity: u32) -> Printer {
    Printer::from_input(NewPrinter {
        name: name.to_string(),
        printer_type,
        capabilities: PrinterCapabilities {
            max_print_size: size.to_string(),
            color_support: color,
            daily_capacity: capacity,
        },
    })
}

fn worker(code: &str, name: &str, position: &str, skills: &[&str], shift: Shift, rating: Decimal) -> Worker {
    Worker::from_input(NewWorker {
        employee_code: code.to_string(),
        name: name.to_string(),
        position: position.to_string(),
        department: "Production".to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        shift,
        rating: Some(rating),
    })
}

impl ProductionConsole {
    /// Console preloaded with a small corrugated-box and label shop
    pub fn with_demo_data() -> WorkflowResult<Self> {
        let shipping_box = product("Corrugated Shipping Box", 500);
        let carton = product("Laminated Folding Carton", 800);
        let labels = product("Printed Label Roll", 2000);

        let liner = material("Kraft Liner Board", UnitOfMeasure::Sheet);
        let fluting = material("Fluting Paper", UnitOfMeasure::Sheet);
        let ink = material("Process Ink CMYK", UnitOfMeasure::Kilogram);
        let film = material("Lamination Film", UnitOfMeasure::Meter);
        let glue = material("Starch Glue", UnitOfMeasure::Kilogram);
        let label_stock = material("Self-adhesive Label Stock", UnitOfMeasure::Roll);

        let bom = vec![
            line(&shipping_box, &liner, Decimal::from(2)),
            line(&shipping_box, &fluting, Decimal::ONE),
            line(&shipping_box, &ink, Decimal::new(5, 3)),
            line(&shipping_box, &glue, Decimal::new(2, 2)),
            line(&carton, &liner, Decimal::ONE),
            line(&carton, &ink, Decimal::new(8, 3)),
            line(&carton, &film, Decimal::new(3, 1)),
            line(&carton, &glue, Decimal::new(1, 2)),
            line(&labels, &label_stock, Decimal::new(1, 2)),
            line(&labels, &ink, Decimal::new(1, 3)),
        ];

        let ledger = InventoryLedger::new(vec![
            InventoryRecord::new(liner.id, Decimal::from(5000)),
            InventoryRecord::new(fluting.id, Decimal::from(1500)),
            InventoryRecord::new(ink.id, Decimal::from(40)),
            InventoryRecord::new(film.id, Decimal::from(600)),
            InventoryRecord::new(glue.id, Decimal::from(25)),
            InventoryRecord::new(label_stock.id, Decimal::from(30)),
        ]);

        let catalog = Catalog::new(
            vec![shipping_box, carton, labels],
            vec![liner, fluting, ink, film, glue, label_stock],
            bom,
        )?;

        let mut console = Self::new(catalog, ledger);
        console.printers = vec![
            printer("Heidelberg Speedmaster 74", PrinterType::Offset, "52x74 cm", true, 15000),
            printer("Bobst Flexo 160", PrinterType::Flexo, "160 cm web", true, 20000),
            printer("HP Indigo 6K", PrinterType::Digital, "34 cm web", true, 8000),
        ];
        console.workers = vec![
            worker("OP-101", "Minh Tran", "Press Operator", &["offset", "color matching"], Shift::Morning, Decimal::new(45, 1)),
            worker("OP-102", "Lan Pham", "Press Operator", &["flexo", "die-cutting"], Shift::Afternoon, Decimal::new(42, 1)),
            worker("FN-201", "Quang Le", "Finishing Technician", &["lamination", "gluing"], Shift::Morning, Decimal::new(38, 1)),
        ];

        tracing::info!(
            products = console.products().len(),
            materials = console.materials().len(),
            printers = console.printers.len(),
            workers = console.workers.len(),
            "demo data loaded"
        );
        Ok(console)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_employee_code;

    #[test]
    fn test_demo_data_is_consistent() {
        let console = ProductionConsole::with_demo_data().unwrap();
        assert_eq!(console.products().len(), 3);
        assert_eq!(console.inventory().len(), console.materials().len());
        for entry in console.bom() {
            assert!(console.product(entry.product_id).is_ok());
            assert!(console.material(entry.material_id).is_ok());
        }
        for worker in console.workers() {
            assert!(validate_employee_code(&worker.employee_code).is_ok());
        }
        assert!(console.printers().iter().all(|p| p.accepts_work()));
    }

    #[test]
    fn test_demo_box_order_is_fulfillable() {
        let mut console = ProductionConsole::with_demo_data().unwrap();
        let product_id = console.products()[0].id;
        let order = console
            .create_order(crate::models::NewOrder {
                product_id,
                quantity: 1000,
                delivery_date: chrono::NaiveDate::from_ymd_opt(2030, 1, 15).unwrap(),
                customer_name: "Saigon Tea House".to_string(),
                customer_phone: None,
                customer_email: None,
                customer_company: None,
                notes: None,
            })
            .unwrap();
        assert!(console.check_fulfillment(order.id).unwrap().can_fulfill);
    }
}
