//! The interactive console session.
//!
//! A session owns the order service and drives it from line-oriented input.
//! Input and output are generic so tests can run a whole session in memory.

use crate::error::ConsoleError;
use crate::observers::{self, Outbox};
use crate::style::{CYAN, GREEN, RED, RESET, YELLOW};
use servery_core::customer::{Customer, OrderKind};
use servery_core::error::OrderError;
use servery_core::id::{MenuIndex, TableNumber};
use servery_core::money::{Amount, amount_to_f64};
use servery_core::role::Role;
use servery_core::service::OrderService;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

const MAIN_MENU: [&str; 11] = [
    "1. Show Menu",
    "2. Place TakeAway Order",
    "3. Place DineIn Order",
    "4. Serve TakeAway Order",
    "5. Serve DineIn Order",
    "6. Serve All Orders",
    "7. View Served Orders",
    "8. View Pending Orders",
    "9. View Pending Bill",
    "10. View Total Earnings",
    "11. Search Served Orders by Name",
];

const EXIT_CHOICE: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Session<R, W> {
    service: OrderService,
    input: R,
    out: W,
    outbox: Outbox,
    delay: Duration,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Wrap `service`, registering the console's observers on it.
    pub fn new(mut service: OrderService, input: R, out: W, delay: Duration) -> Self {
        let outbox = Outbox::new();
        observers::register(&mut service, &outbox);
        Self {
            service,
            input,
            out,
            outbox,
            delay,
        }
    }

    /// Run until the user exits or input ends. When `role` is `None` the
    /// user is asked for one.
    pub fn run(&mut self, role: Option<Role>) -> Result<(), ConsoleError> {
        let role = match role {
            Some(role) => role,
            None => match self.prompt_role()? {
                Some(role) => role,
                None => return Ok(()),
            },
        };
        writeln!(self.out, "\n{}", role.dashboard_banner())?;
        debug!(%role, "session started");

        loop {
            self.print_main_menu()?;
            let Some(line) = self.read_line()? else {
                break;
            };
            let Ok(choice) = line.parse::<u32>() else {
                self.error_line("Invalid option")?;
                continue;
            };

            match self.dispatch(role, choice) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(ConsoleError::UnexpectedEof) => break,
                Err(err @ ConsoleError::InvalidNumber { .. }) => {
                    self.error_line(&err.to_string())?;
                }
                Err(err) => return Err(err),
            }
            self.flush_observers()?;
        }

        self.out.flush()?;
        Ok(())
    }

    /// The service, for inspection after a session ends.
    pub fn service(&self) -> &OrderService {
        &self.service
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    fn dispatch(&mut self, role: Role, choice: u32) -> Result<Flow, ConsoleError> {
        if (2..EXIT_CHOICE).contains(&choice) && !role.can_manage_orders() {
            debug!(%role, choice, "option denied");
            self.error_line("Access denied: guests may only view the menu.")?;
            return Ok(Flow::Continue);
        }

        match choice {
            1 => self.show_menu()?,
            2 => self.place_take_away()?,
            3 => self.place_dine_in()?,
            4 => self.serve_take_away()?,
            5 => self.serve_dine_in()?,
            6 => self.serve_all()?,
            7 => self.view_served()?,
            8 => self.view_pending()?,
            9 => {
                let pending = self.service.pending_bill();
                self.money_line("Pending", pending)?;
            }
            10 => {
                let earnings = self.service.total_earnings();
                self.money_line("Earnings", earnings)?;
            }
            11 => self.search()?,
            EXIT_CHOICE => return Ok(Flow::Exit),
            _ => self.error_line("Invalid option")?,
        }
        Ok(Flow::Continue)
    }

    // -----------------------------------------------------------------------
    // Options
    // -----------------------------------------------------------------------

    fn show_menu(&mut self) -> Result<(), ConsoleError> {
        writeln!(self.out, "\n===== MENU =====")?;
        for (index, item) in self.service.menu().iter() {
            writeln!(
                self.out,
                "{index}. {} - Rs. {}",
                item.name,
                amount_to_f64(item.price)
            )?;
        }
        Ok(())
    }

    fn place_take_away(&mut self) -> Result<(), ConsoleError> {
        let name = self.prompt_text("Name")?;
        let index = MenuIndex(self.prompt_number("Menu Index")?);
        let quantity = self.prompt_number("Qty")?;
        let age = self.prompt_number("Age")?;

        match self.service.place_take_away(&name, index, quantity, age) {
            Ok(_) => {
                writeln!(self.out, "TakeAway order placed successfully for {name}!")?;
                self.pause();
            }
            Err(err) => self.error_line(&err.to_string())?,
        }
        Ok(())
    }

    fn place_dine_in(&mut self) -> Result<(), ConsoleError> {
        let name = self.prompt_text("Name")?;
        let index = MenuIndex(self.prompt_number("Menu Index")?);
        let quantity = self.prompt_number("Qty")?;
        let age = self.prompt_number("Age")?;
        let table = TableNumber(self.prompt_number("Table")?);

        match self.service.place_dine_in(&name, index, quantity, age, table) {
            Ok(_) => {
                writeln!(
                    self.out,
                    "DineIn order placed successfully for {name} at table {table}!"
                )?;
                self.pause();
            }
            Err(err) => self.error_line(&err.to_string())?,
        }
        Ok(())
    }

    fn serve_take_away(&mut self) -> Result<(), ConsoleError> {
        match self.service.serve_take_away() {
            Ok(_) => Ok(()),
            Err(err) => self.serve_failed(err, OrderKind::TakeAway),
        }
    }

    fn serve_dine_in(&mut self) -> Result<(), ConsoleError> {
        match self.service.serve_dine_in() {
            Ok(_) => Ok(()),
            Err(err) => self.serve_failed(err, OrderKind::DineIn),
        }
    }

    /// Served orders are announced by the observers.
    fn serve_all(&mut self) -> Result<(), ConsoleError> {
        match self.service.serve_all(|_| {}) {
            Ok(0) => writeln!(self.out, "Nothing to serve.")?,
            Ok(count) => debug!(count, "served all pending orders"),
            Err(err) => {
                warn!(%err, "serve all stopped early");
                // Takeaway drains first, so a blocked takeaway head is the culprit.
                let kind = match &err {
                    OrderError::DuplicateKey { name }
                        if self
                            .service
                            .pending_take_away()
                            .next()
                            .is_some_and(|c| c.name() == name) =>
                    {
                        OrderKind::TakeAway
                    }
                    _ => OrderKind::DineIn,
                };
                self.serve_failed(err, kind)?;
            }
        }
        Ok(())
    }

    /// Report a failed serve. A head order whose name was already served
    /// blocks its queue, so offer to discard it.
    fn serve_failed(&mut self, err: OrderError, kind: OrderKind) -> Result<(), ConsoleError> {
        self.error_line(&err.to_string())?;
        let OrderError::DuplicateKey { name } = err else {
            return Ok(());
        };

        let answer = self.prompt_text(&format!(
            "Discard the pending {kind} order for {name}? (y/n)"
        ))?;
        if !answer.eq_ignore_ascii_case("y") {
            return Ok(());
        }
        let discarded = match kind {
            OrderKind::TakeAway => self.service.discard_take_away(),
            OrderKind::DineIn => self.service.discard_dine_in(),
        };
        match discarded {
            Ok(customer) => {
                writeln!(self.out, "{kind} order discarded for {}.", customer.name())?;
                self.pause();
            }
            Err(err) => self.error_line(&err.to_string())?,
        }
        Ok(())
    }

    fn view_served(&mut self) -> Result<(), ConsoleError> {
        let served = self.service.served_orders();
        if served.is_empty() {
            writeln!(self.out, "No served orders yet.")?;
        }
        for record in &served {
            let line = order_summary(&record.customer, " ordered ");
            writeln!(self.out, "{GREEN}{line}{RESET}")?;
            self.pause();
        }
        Ok(())
    }

    fn view_pending(&mut self) -> Result<(), ConsoleError> {
        writeln!(self.out, "{CYAN}\nPending Orders:{RESET}")?;
        self.pause();

        let mut lines: Vec<String> = self
            .service
            .pending_take_away()
            .map(|c| format!("[TakeAway] {}", order_summary(c, " - ")))
            .collect();
        lines.extend(self.service.pending_dine_in().map(|o| {
            format!(
                "[DineIn] {} [Table {}]",
                order_summary(&o.customer, " - "),
                o.table
            )
        }));

        for line in lines {
            writeln!(self.out, "{line}")?;
            self.pause();
        }
        Ok(())
    }

    fn search(&mut self) -> Result<(), ConsoleError> {
        let name = self.prompt_text("Enter customer name to search")?;
        let line = match self.service.search_by_name(&name) {
            Some(record) => format!(
                " Found: {} [{}]",
                order_summary(&record.customer, " ordered "),
                record.kind
            ),
            None => format!(" No served order found for: {name}"),
        };
        writeln!(self.out, "{line}")?;
        self.pause();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Prompts and output
    // -----------------------------------------------------------------------

    fn prompt_role(&mut self) -> Result<Option<Role>, ConsoleError> {
        write!(self.out, "{CYAN}User Type (1 = Admin, 2 = Guest): {RESET}")?;
        self.out.flush()?;
        self.pause();
        // Anything that is not an admin choice falls back to guest.
        Ok(self
            .read_line()?
            .map(|line| line.parse().unwrap_or(Role::Guest)))
    }

    fn print_main_menu(&mut self) -> Result<(), ConsoleError> {
        writeln!(
            self.out,
            "{CYAN}\n==== Welcome! What would you like to do? ===={RESET}"
        )?;
        self.pause();
        for entry in MAIN_MENU {
            writeln!(self.out, "{YELLOW}{entry}{RESET}")?;
        }
        writeln!(self.out, "{RED}{EXIT_CHOICE}. Exit{RESET}")?;
        write!(self.out, "{CYAN}Choice: {RESET}")?;
        self.out.flush()?;
        self.pause();
        Ok(())
    }

    fn prompt_text(&mut self, label: &str) -> Result<String, ConsoleError> {
        write!(self.out, "{CYAN}{label}: {RESET}")?;
        self.out.flush()?;
        self.pause();
        self.read_line()?.ok_or(ConsoleError::UnexpectedEof)
    }

    fn prompt_number<T: FromStr>(&mut self, label: &'static str) -> Result<T, ConsoleError> {
        let input = self.prompt_text(label)?;
        input.parse().map_err(|_| ConsoleError::InvalidNumber {
            field: label,
            input,
        })
    }

    /// Next trimmed input line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, ConsoleError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn money_line(&mut self, label: &str, amount: Amount) -> Result<(), ConsoleError> {
        writeln!(
            self.out,
            "{YELLOW}{label}: Rs. {}{RESET}",
            amount_to_f64(amount)
        )?;
        self.pause();
        Ok(())
    }

    fn error_line(&mut self, message: &str) -> Result<(), ConsoleError> {
        writeln!(self.out, "{RED}{message}{RESET}")?;
        self.pause();
        Ok(())
    }

    fn flush_observers(&mut self) -> Result<(), ConsoleError> {
        for line in self.outbox.drain() {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    fn pause(&self) {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }
}

/// `<name><sep><item> (<qty>) - Rs. <bill>`
fn order_summary(customer: &Customer, sep: &str) -> String {
    format!(
        "{}{sep}{} ({}) - Rs. {}",
        customer.name(),
        customer.item_name(),
        customer.quantity(),
        amount_to_f64(customer.bill())
    )
}

// ===========================================================================
// Tests
// ===========================================================================
