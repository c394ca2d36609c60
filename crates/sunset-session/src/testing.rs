//! In-memory `PosBackend` used by the session tests.
//!
//! Behaves like the real service: assigns ids, stamps times from a
//! controllable clock, and enforces the same rules the service would.
//! It can also be switched offline to fail every call with a transport
//! error, which is how the tests exercise the state-unchanged-on-failure
//! guarantees.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sunset_client::{ClientError, ClientResult, PosBackend};
use sunset_core::{
    Cart, CoreError, InventoryDraft, InventoryItem, MenuItem, MenuItemDraft, Money, Order,
    OrderDraft, OrderStatus, SaleLine, SalesRecord,
};
use uuid::Uuid;

// =============================================================================
// Fixtures
// =============================================================================

pub(crate) fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

pub(crate) fn menu_item(id: &str, name: &str, category: &str, rupees: i64) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price: Money::from_rupees(rupees),
    }
}

pub(crate) fn sample_menu() -> Vec<MenuItem> {
    vec![
        menu_item("m1", "Chicken Karahi", "Main Course", 2000),
        menu_item("m2", "Doodh Patti", "Beverages", 250),
        menu_item("m3", "Gulab Jamun", "Desserts", 400),
    ]
}

pub(crate) fn draft_for(table: &str, item: &MenuItem, quantity: i64) -> OrderDraft {
    let mut cart = Cart::new();
    cart.table_number = table.to_string();
    cart.add_item(item).unwrap();
    for _ in 1..quantity {
        cart.increase(&item.id);
    }
    OrderDraft::from_cart(&cart).unwrap()
}

pub(crate) fn record_at(date: DateTime<Utc>, name: &str, rupees: i64, quantity: i64) -> SalesRecord {
    SalesRecord {
        date,
        items: vec![SaleLine {
            name: name.to_string(),
            price: Money::from_rupees(rupees),
            quantity,
        }],
        total: Money::from_rupees(rupees * quantity),
    }
}

// =============================================================================
// FakeBackend
// =============================================================================

pub(crate) struct FakeBackend {
    state: Mutex<FakeState>,
}

struct FakeState {
    menu: Vec<MenuItem>,
    orders: Vec<Order>,
    inventory: Vec<InventoryItem>,
    history: Vec<SalesRecord>,
    closings: Vec<DateTime<Utc>>,
    now: DateTime<Utc>,
    offline: bool,
}

impl FakeBackend {
    pub fn new() -> Self {
        FakeBackend {
            state: Mutex::new(FakeState {
                menu: Vec::new(),
                orders: Vec::new(),
                inventory: Vec::new(),
                history: Vec::new(),
                closings: Vec::new(),
                now: ts("2025-03-01T09:00:00Z"),
                offline: false,
            }),
        }
    }

    pub fn with_menu(items: Vec<MenuItem>) -> Self {
        let backend = FakeBackend::new();
        backend.state.lock().unwrap().menu = items;
        backend
    }

    /// Moves the service clock. Completion and closing stamps come from it.
    pub fn set_now(&self, at: DateTime<Utc>) {
        self.state.lock().unwrap().now = at;
    }

    /// Makes every subsequent call fail with a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    pub fn push_inventory(&self, item: InventoryItem) {
        self.state.lock().unwrap().inventory.push(item);
    }

    pub fn push_history(&self, record: SalesRecord) {
        self.state.lock().unwrap().history.push(record);
    }

    pub fn push_closing(&self, at: DateTime<Utc>) {
        self.state.lock().unwrap().closings.push(at);
    }

    pub fn history_len(&self) -> usize {
        self.state.lock().unwrap().history.len()
    }

    pub fn inventory_len(&self) -> usize {
        self.state.lock().unwrap().inventory.len()
    }

    pub fn menu_len(&self) -> usize {
        self.state.lock().unwrap().menu.len()
    }

    fn guard(state: &FakeState) -> ClientResult<()> {
        if state.offline {
            return Err(ClientError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

fn assign_id() -> String {
    Uuid::new_v4().to_string()
}

fn not_found(what: &str, id: &str) -> ClientError {
    ClientError::Status {
        status: 404,
        message: format!("{what} not found: {id}"),
    }
}

fn rejected(err: CoreError) -> ClientError {
    ClientError::Status {
        status: 422,
        message: err.to_string(),
    }
}

#[async_trait]
impl PosBackend for FakeBackend {
    async fn list_menu_items(&self) -> ClientResult<Vec<MenuItem>> {
        let state = self.state.lock().unwrap();
        Self::guard(&state)?;
        Ok(state.menu.clone())
    }

    async fn create_menu_item(&self, draft: &MenuItemDraft) -> ClientResult<MenuItem> {
        let mut state = self.state.lock().unwrap();
        Self::guard(&state)?;
        let item = MenuItem {
            id: assign_id(),
            name: draft.name.clone(),
            category: draft.category.clone(),
            price: draft.price,
        };
        state.menu.push(item.clone());
        Ok(item)
    }

    async fn update_menu_item(&self, id: &str, draft: &MenuItemDraft) -> ClientResult<MenuItem> {
        let mut state = self.state.lock().unwrap();
        Self::guard(&state)?;
        let item = state
            .menu
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| not_found("Menu item", id))?;
        item.name = draft.name.clone();
        item.category = draft.category.clone();
        item.price = draft.price;
        Ok(item.clone())
    }

    async fn delete_menu_item(&self, id: &str) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::guard(&state)?;
        let before = state.menu.len();
        state.menu.retain(|item| item.id != id);
        if state.menu.len() == before {
            return Err(not_found("Menu item", id));
        }
        Ok(())
    }

    async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        let state = self.state.lock().unwrap();
        Self::guard(&state)?;
        Ok(state.orders.clone())
    }

    async fn create_order(&self, draft: &OrderDraft) -> ClientResult<Order> {
        let mut state = self.state.lock().unwrap();
        Self::guard(&state)?;
        let order = Order {
            id: assign_id(),
            table_number: draft.table_number.clone(),
            items: draft.items.clone(),
            total_price: draft.total_price,
            status: OrderStatus::Pending,
            completed_at: None,
        };
        state.orders.push(order.clone());
        Ok(order)
    }

    async fn add_order_item(
        &self,
        order_id: &str,
        item_id: &str,
        quantity: i64,
    ) -> ClientResult<Order> {
        let mut state = self.state.lock().unwrap();
        Self::guard(&state)?;
        let item = state
            .menu
            .iter()
            .find(|item| item.id == item_id)
            .cloned()
            .ok_or_else(|| not_found("Menu item", item_id))?;
        let order = state
            .orders
            .iter_mut()
            .find(|order| order.id == order_id)
            .ok_or_else(|| not_found("Order", order_id))?;
        order.add_item(&item, quantity).map_err(rejected)?;
        Ok(order.clone())
    }

    async fn complete_order(&self, order_id: &str) -> ClientResult<Order> {
        let mut state = self.state.lock().unwrap();
        Self::guard(&state)?;
        let now = state.now;
        let order = state
            .orders
            .iter_mut()
            .find(|order| order.id == order_id)
            .ok_or_else(|| not_found("Order", order_id))?;
        order.complete(now).map_err(rejected)?;
        Ok(order.clone())
    }

    async fn list_inventory(&self) -> ClientResult<Vec<InventoryItem>> {
        let state = self.state.lock().unwrap();
        Self::guard(&state)?;
        Ok(state.inventory.clone())
    }

    async fn create_inventory_item(&self, draft: &InventoryDraft) -> ClientResult<InventoryItem> {
        let mut state = self.state.lock().unwrap();
        Self::guard(&state)?;
        let item = InventoryItem {
            id: assign_id(),
            name: draft.name.clone(),
            stock: draft.stock,
            sell_quantity: 0,
        };
        state.inventory.push(item.clone());
        Ok(item)
    }

    async fn update_sell_quantity(&self, id: &str, value: i64) -> ClientResult<InventoryItem> {
        let mut state = self.state.lock().unwrap();
        Self::guard(&state)?;
        let item = state
            .inventory
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| not_found("Inventory item", id))?;
        item.set_sell_quantity(value).map_err(rejected)?;
        Ok(item.clone())
    }

    async fn list_history(&self) -> ClientResult<Vec<SalesRecord>> {
        let state = self.state.lock().unwrap();
        Self::guard(&state)?;
        Ok(state.history.clone())
    }

    async fn append_history(&self, record: &SalesRecord) -> ClientResult<SalesRecord> {
        let mut state = self.state.lock().unwrap();
        Self::guard(&state)?;
        state.history.push(record.clone());
        Ok(record.clone())
    }

    async fn list_shift_closings(&self) -> ClientResult<Vec<DateTime<Utc>>> {
        let state = self.state.lock().unwrap();
        Self::guard(&state)?;
        Ok(state.closings.clone())
    }

    async fn close_shift(&self) -> ClientResult<DateTime<Utc>> {
        let mut state = self.state.lock().unwrap();
        Self::guard(&state)?;
        let stamp = state.now;
        state.closings.push(stamp);
        Ok(stamp)
    }
}
