//! Merchant endpoints of API v4.1.
//!
//! [`Merchant`] borrows a [`BookerClient`] and turns each endpoint into a
//! typed call: it builds the endpoint's parameters, picks the HTTP method and
//! path, and hands them to the client's executor or pagination engine.
//! Endpoints without a model return the decoded JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use booker_api::rest::resources::v4_1::{ListOptions, Merchant};
//! use booker_api::LocationId;
//! use chrono::NaiveDate;
//!
//! let merchant = Merchant::new(&client);
//! let location = LocationId::new(3749);
//!
//! let appointments = merchant
//!     .appointments(
//!         location,
//!         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
//!         ListOptions::default(),
//!     )
//!     .await?;
//!
//! // Only the first page
//! let treatments = merchant.treatments(location, ListOptions::single_page()).await?;
//! ```

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::{Map, Value};

use crate::clients::rest::{BookerClient, BookerError};
use crate::clients::HttpMethod;
use crate::config::LocationId;
use crate::rest::resources::v4_1::{
    booker_datetime, Appointment, Customer, Employee, FeatureSettings, Location,
    LocationDaySchedule, OnlineBookingSettings, Treatment, DEFAULT_CUSTOMER_FIELDS,
};
use crate::rest::{params, Model, ModelDescriptor, Params};

const PREFIX: &str = "/v4.1/merchant";

/// Payment method id Booker assigns to cash.
const CASH_PAYMENT_METHOD_ID: u64 = 4;

/// Record type filter for customers (as opposed to leads).
const CUSTOMER_RECORD_TYPE: u64 = 1;

/// Options for list endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOptions {
    /// Follow pages until the listing is exhausted.
    pub fetch_all: bool,
    /// Caller overrides, applied on top of the endpoint's own parameters.
    pub params: Params,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            fetch_all: true,
            params: Params::new(),
        }
    }
}

impl ListOptions {
    /// Fetches only the requested page.
    #[must_use]
    pub fn single_page() -> Self {
        Self {
            fetch_all: false,
            ..Self::default()
        }
    }

    /// Sets caller overrides.
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }
}

/// Merchant-scoped endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Merchant<'c> {
    client: &'c BookerClient,
}

impl<'c> Merchant<'c> {
    /// Wraps a client.
    #[must_use]
    pub const fn new(client: &'c BookerClient) -> Self {
        Self { client }
    }

    /// Returns the wrapped client.
    #[must_use]
    pub const fn client(&self) -> &'c BookerClient {
        self.client
    }

    // === Location ===

    /// Fetches a location's online booking settings.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn online_booking_settings(
        &self,
        location_id: LocationId,
    ) -> Result<OnlineBookingSettings, BookerError> {
        let path = location_path(location_id, "online_booking_settings");
        self.get_one(&path, Params::new(), Params::new()).await
    }

    /// Fetches a location's feature switches.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn location_feature_settings(
        &self,
        location_id: LocationId,
    ) -> Result<FeatureSettings, BookerError> {
        let path = location_path(location_id, "feature_settings");
        self.get_one(&path, Params::new(), Params::new()).await
    }

    /// Fetches a location's default weekly schedule.
    ///
    /// The endpoint requires `fromDate`/`toDate` but ignores them when
    /// `getDefaultDaySchedule` is set, so both are stamped with the current
    /// time.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::request_many`].
    pub async fn location_day_schedules(
        &self,
        location_id: LocationId,
        overrides: Params,
    ) -> Result<Vec<LocationDaySchedule>, BookerError> {
        let now = booker_datetime(&Utc::now());
        let additional = Params::new()
            .with("getDefaultDaySchedule", true)
            .with("fromDate", now.clone())
            .with("toDate", now);
        let params = self.client.build_params(additional, overrides, false);
        self.client
            .request_many(HttpMethod::Get, &location_path(location_id, "schedule"), &params)
            .await
    }

    /// Turns appointment reminders on or off for a location.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn update_location_notification_settings(
        &self,
        location_id: LocationId,
        send_appointment_reminders: bool,
    ) -> Result<Value, BookerError> {
        let mut settings = Map::new();
        settings.insert(
            "SendAppointmentReminders".to_string(),
            Value::Bool(send_appointment_reminders),
        );
        let additional = Params::new().with("NotificationSettings", settings);
        let path = location_path(location_id, "notification_settings");
        self.raw(HttpMethod::Put, &path, additional, Params::new()).await
    }

    /// Fetches a location.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn location(&self, location_id: LocationId) -> Result<Location, BookerError> {
        let path = format!("{PREFIX}/location/{}", location_id.get());
        self.get_one(&path, Params::new(), Params::new()).await
    }

    // === Appointments ===

    /// Confirms an appointment.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn confirm_appointment(
        &self,
        appointment_id: u64,
    ) -> Result<Appointment, BookerError> {
        let params = self
            .client
            .build_params(Params::new().with("ID", appointment_id), Params::new(), false);
        self.client
            .request_one(
                HttpMethod::Put,
                &format!("{PREFIX}/appointment/confirm"),
                &params,
            )
            .await
    }

    /// Lists appointments starting between two dates.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::paginated_request`].
    pub async fn appointments(
        &self,
        location_id: LocationId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        options: ListOptions,
    ) -> Result<Vec<Appointment>, BookerError> {
        let additional = appointment_window(location_id, start_date, end_date);
        self.list(&format!("{PREFIX}/appointments"), additional, options).await
    }

    /// Lists appointments with the reduced ("partial") record shape.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::paginated_request`].
    pub async fn appointments_partial(
        &self,
        location_id: LocationId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        options: ListOptions,
    ) -> Result<Vec<Appointment>, BookerError> {
        let additional = appointment_window(location_id, start_date, end_date);
        self.list(&format!("{PREFIX}/appointments/partial"), additional, options).await
    }

    // === Staff and services ===

    /// Lists the employees of a location.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::paginated_request`].
    pub async fn employees(
        &self,
        location_id: LocationId,
        options: ListOptions,
    ) -> Result<Vec<Employee>, BookerError> {
        let additional = Params::new().with(params::LOCATION_ID, location_id.get());
        self.list(&format!("{PREFIX}/employees"), additional, options).await
    }

    /// Lists the treatments offered at a location.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::paginated_request`].
    pub async fn treatments(
        &self,
        location_id: LocationId,
        options: ListOptions,
    ) -> Result<Vec<Treatment>, BookerError> {
        let additional = Params::new().with(params::LOCATION_ID, location_id.get());
        self.list(&format!("{PREFIX}/treatments"), additional, options).await
    }

    // === Customers ===

    /// Lists the customers registered at exactly this location.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::paginated_request`].
    pub async fn customers(
        &self,
        location_id: LocationId,
        options: ListOptions,
    ) -> Result<Vec<Customer>, BookerError> {
        let additional = Params::new()
            .with("FilterByExactLocationID", true)
            .with(params::LOCATION_ID, location_id.get())
            .with("CustomerRecordType", CUSTOMER_RECORD_TYPE);
        self.list(&format!("{PREFIX}/customers"), additional, options).await
    }

    /// Fetches one customer.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn customer(
        &self,
        customer_id: u64,
        overrides: Params,
    ) -> Result<Customer, BookerError> {
        self.get_one(&customer_path(customer_id), customer_lookup(), overrides).await
    }

    /// Fetches one customer as the raw response body.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn customer_raw(
        &self,
        customer_id: u64,
        overrides: Params,
    ) -> Result<Value, BookerError> {
        self.raw(
            HttpMethod::Get,
            &customer_path(customer_id),
            customer_lookup(),
            overrides,
        )
        .await
    }

    /// Updates a customer's contact fields.
    ///
    /// The API expects the full record back, so the current record is fetched
    /// first; its personal fields are cut down to the contact fields, `update`
    /// is laid over them, and the result is sent with the session's location.
    /// Returns `None` without sending anything when the lookup carries no
    /// customer record.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn update_customer(
        &self,
        customer_id: u64,
        update: Params,
    ) -> Result<Option<Value>, BookerError> {
        let current = self.customer_raw(customer_id, Params::new()).await?;
        let location_id = self.client.session().location_id();
        let Some(record) = prepare_customer_update(current, update, location_id) else {
            tracing::debug!(customer_id, "Customer lookup returned no record; skipping update");
            return Ok(None);
        };
        self.raw(
            HttpMethod::Put,
            &customer_path(customer_id),
            record,
            Params::new(),
        )
        .await
        .map(Some)
    }

    // === Specials ===

    /// Creates a coupon special valid between two instants.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn create_special<Tz>(
        &self,
        location_id: LocationId,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
        coupon_code: &str,
        name: &str,
        overrides: Params,
    ) -> Result<Value, BookerError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let additional = Params::new()
            .with(params::LOCATION_ID, location_id.get())
            .with("ApplicableStartDate", start.to_rfc3339())
            .with("ApplicableEndDate", end.to_rfc3339())
            .with("CouponCode", coupon_code)
            .with("Name", name);
        self.raw(HttpMethod::Post, &format!("{PREFIX}/special"), additional, overrides).await
    }

    // === Orders ===

    /// Creates an order.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn create_order(&self, order: Params) -> Result<Value, BookerError> {
        self.raw(HttpMethod::Post, &format!("{PREFIX}/order"), order, Params::new()).await
    }

    /// Records a cash payment against an order.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn add_cash_payment_to_order(
        &self,
        order_id: u64,
        amount: f64,
        overrides: Params,
    ) -> Result<Value, BookerError> {
        let additional = Params::new().with("PaymentItem", cash_payment_item(amount));
        self.raw(
            HttpMethod::Post,
            &order_path(order_id, "add_payment"),
            additional,
            overrides,
        )
        .await
    }

    /// Places an order.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn place_order(
        &self,
        order_id: u64,
        overrides: Params,
    ) -> Result<Value, BookerError> {
        self.raw(
            HttpMethod::Post,
            &order_path(order_id, "place_order"),
            Params::new(),
            overrides,
        )
        .await
    }

    /// Adds a quantity of a product variant to an order.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn add_product_to_order(
        &self,
        order_id: u64,
        product_variant_id: u64,
        quantity: u32,
        overrides: Params,
    ) -> Result<Value, BookerError> {
        let additional = Params::new()
            .with("OrderID", order_id)
            .with("ProductVariantID", product_variant_id)
            .with("Quantity", quantity);
        self.raw(
            HttpMethod::Put,
            &format!("{PREFIX}/order/add_product"),
            additional,
            overrides,
        )
        .await
    }

    /// Overrides the price of one order item.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn override_order_item_price(
        &self,
        order_id: u64,
        order_item_id: u64,
        price: f64,
        overrides: Params,
    ) -> Result<Value, BookerError> {
        let additional = Params::new()
            .with("OrderItemID", order_item_id)
            .with("Price", amount(price));
        self.raw(
            HttpMethod::Put,
            &order_path(order_id, "override_price"),
            additional,
            overrides,
        )
        .await
    }

    /// Searches the product catalogue.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn find_products(&self, criteria: Params) -> Result<Value, BookerError> {
        self.raw(
            HttpMethod::Post,
            &format!("{PREFIX}/order/find_products"),
            criteria,
            Params::new(),
        )
        .await
    }

    /// Fetches an order with its customer and without applicable specials.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn get_order(&self, order_id: u64, overrides: Params) -> Result<Value, BookerError> {
        let additional = Params::new()
            .with("returnPartialObjectOrder", false)
            .with("excludeCustomerObject", false)
            .with("excludeApplicableSpecials", true);
        self.raw(
            HttpMethod::Get,
            &format!("{PREFIX}/order/{order_id}"),
            additional,
            overrides,
        )
        .await
    }

    /// Searches the orders of a location.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn find_orders(
        &self,
        location_id: LocationId,
        overrides: Params,
    ) -> Result<Value, BookerError> {
        let additional = Params::new().with(params::LOCATION_ID, location_id.get());
        self.raw(HttpMethod::Post, &format!("{PREFIX}/orders"), additional, overrides).await
    }

    /// Looks up stock levels for product variants.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn get_quantity_in_stock(
        &self,
        product_variant_ids: &[u64],
        overrides: Params,
    ) -> Result<Value, BookerError> {
        let additional = Params::new().with("ProductVariantIDs", product_variant_ids.to_vec());
        self.raw(
            HttpMethod::Put,
            &format!("{PREFIX}/order/quantity_in_stock"),
            additional,
            overrides,
        )
        .await
    }

    /// Creates a user login.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn create_login(&self, login: Params) -> Result<Value, BookerError> {
        self.raw(HttpMethod::Post, &format!("{PREFIX}/user"), login, Params::new()).await
    }

    /// Attaches a customer to an order.
    ///
    /// # Errors
    ///
    /// See [`BookerClient::single_request`].
    pub async fn add_customer_to_order(
        &self,
        order_id: u64,
        customer: Value,
        overrides: Params,
    ) -> Result<Value, BookerError> {
        let additional = Params::new().with("Customer", customer);
        self.raw(
            HttpMethod::Post,
            &order_path(order_id, "add_customer"),
            additional,
            overrides,
        )
        .await
    }

    // === Helpers ===

    async fn get_one<M: Model>(
        &self,
        path: &str,
        additional: Params,
        overrides: Params,
    ) -> Result<M, BookerError> {
        let params = self.client.build_params(additional, overrides, false);
        self.client.request_one(HttpMethod::Get, path, &params).await
    }

    async fn raw(
        &self,
        method: HttpMethod,
        path: &str,
        additional: Params,
        overrides: Params,
    ) -> Result<Value, BookerError> {
        let params = self.client.build_params(additional, overrides, false);
        self.client.request_raw(method, path, &params).await
    }

    async fn list<M: Model>(
        &self,
        path: &str,
        additional: Params,
        options: ListOptions,
    ) -> Result<Vec<M>, BookerError> {
        let params = self.client.build_params(additional, options.params, true);
        self.client
            .paginated_request(
                HttpMethod::Post,
                path,
                &params,
                ModelDescriptor::of(),
                options.fetch_all,
            )
            .await
    }
}

fn location_path(location_id: LocationId, resource: &str) -> String {
    format!("{PREFIX}/location/{}/{resource}", location_id.get())
}

fn customer_path(customer_id: u64) -> String {
    format!("{PREFIX}/customer/{customer_id}")
}

fn order_path(order_id: u64, action: &str) -> String {
    format!("{PREFIX}/order/{order_id}/{action}")
}

fn customer_lookup() -> Params {
    Params::new()
        .with("LoadUnpaidAppointments", false)
        .with("includeFieldValues", false)
}

fn appointment_window(
    location_id: LocationId,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Params {
    Params::new()
        .with(params::LOCATION_ID, location_id.get())
        .with("FromStartDate", start_date.format("%Y-%m-%d").to_string())
        .with("ToStartDate", end_date.format("%Y-%m-%d").to_string())
}

fn amount(value: f64) -> Value {
    let mut money = Map::new();
    money.insert("Amount".to_string(), Value::from(value));
    Value::Object(money)
}

fn cash_payment_item(value: f64) -> Value {
    let mut method = Map::new();
    method.insert("ID".to_string(), Value::from(CASH_PAYMENT_METHOD_ID));
    method.insert("Name".to_string(), Value::from("Cash"));

    let mut item = Map::new();
    item.insert(
        "CustomPaymentMethodID".to_string(),
        Value::from(CASH_PAYMENT_METHOD_ID),
    );
    item.insert("Method".to_string(), Value::Object(method));
    item.insert("Amount".to_string(), amount(value));
    Value::Object(item)
}

/// Builds the body of a customer update from the current lookup response.
///
/// Returns `None` when the response holds no `Customer` object.
fn prepare_customer_update(
    lookup: Value,
    update: Params,
    location_id: Option<LocationId>,
) -> Option<Params> {
    let Value::Object(mut body) = lookup else {
        return None;
    };
    let Some(Value::Object(mut record)) = body.remove(Customer::NAME) else {
        return None;
    };

    let mut details: Map<String, Value> = record
        .get(Customer::NAME)
        .and_then(Value::as_object)
        .map(|fields| {
            fields
                .iter()
                .filter(|(key, _)| DEFAULT_CUSTOMER_FIELDS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default();
    details.extend(update);
    record.insert(Customer::NAME.to_string(), Value::Object(details));

    if let Some(location_id) = location_id {
        record.insert(params::LOCATION_ID.to_string(), Value::from(location_id.get()));
    }
    Some(Params::from(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_options_default_fetches_all() {
        let options = ListOptions::default();
        assert!(options.fetch_all);
        assert!(options.params.is_empty());
        assert!(!ListOptions::single_page().fetch_all);
    }

    #[test]
    fn test_appointment_window_formats_dates() {
        let params = appointment_window(
            LocationId::new(3749),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        assert_eq!(params.get("LocationID"), Some(&json!(3749)));
        assert_eq!(params.get("FromStartDate"), Some(&json!("2024-01-01")));
        assert_eq!(params.get("ToStartDate"), Some(&json!("2024-01-31")));
    }

    #[test]
    fn test_cash_payment_item_shape() {
        assert_eq!(
            cash_payment_item(25.5),
            json!({
                "CustomPaymentMethodID": 4,
                "Method": {"ID": 4, "Name": "Cash"},
                "Amount": {"Amount": 25.5}
            })
        );
    }

    #[test]
    fn test_paths() {
        assert_eq!(
            location_path(LocationId::new(7), "schedule"),
            "/v4.1/merchant/location/7/schedule"
        );
        assert_eq!(customer_path(9), "/v4.1/merchant/customer/9");
        assert_eq!(order_path(5, "place_order"), "/v4.1/merchant/order/5/place_order");
    }

    #[test]
    fn test_prepare_customer_update_keeps_contact_fields_only() {
        let lookup = json!({
            "IsSuccess": true,
            "Customer": {
                "ID": 9,
                "LocationID": 1,
                "Customer": {
                    "FirstName": "Dee",
                    "LastName": "Lee",
                    "Email": "old@example.com",
                    "Address": {"City": "Austin"},
                    "DateOfBirth": "/Date(0)/"
                }
            }
        });
        let update = Params::new().with("Email", "new@example.com");

        let body = prepare_customer_update(lookup, update, Some(LocationId::new(3749))).unwrap();

        assert_eq!(body.get("ID"), Some(&json!(9)));
        assert_eq!(body.get("LocationID"), Some(&json!(3749)));
        assert_eq!(
            body.get("Customer"),
            Some(&json!({
                "FirstName": "Dee",
                "LastName": "Lee",
                "Email": "new@example.com"
            }))
        );
    }

    #[test]
    fn test_prepare_customer_update_without_session_location_keeps_record_location() {
        let lookup = json!({"Customer": {"ID": 9, "LocationID": 1, "Customer": {}}});
        let body = prepare_customer_update(lookup, Params::new(), None).unwrap();
        assert_eq!(body.get("LocationID"), Some(&json!(1)));
    }

    #[test]
    fn test_prepare_customer_update_without_record() {
        assert!(prepare_customer_update(json!({"IsSuccess": true}), Params::new(), None).is_none());
        assert!(prepare_customer_update(Value::Null, Params::new(), None).is_none());
    }
}
