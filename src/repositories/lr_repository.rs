use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use rust_decimal::Decimal;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::LrStore;
use crate::models::{LineItem, LrDetails, LrRecord, Party, TemplateDesign};
use crate::utils::errors::{AppError, AppResult};

/// Columnas que pertenecen al formulario, en el orden en que se bindean
const FORM_COLUMNS: [&str; 50] = [
    "lr_type",
    "lr_no",
    "truck_no",
    "from_place",
    "to_place",
    "date",
    "invoice",
    "invoice_amount",
    "invoice_date",
    "po_no",
    "po_date",
    "eway_bill_no",
    "eway_bill_date",
    "eway_ex_date",
    "method_of_packing",
    "address_of_delivery",
    "charged_weight",
    "lorry_type",
    "billing_party",
    "gst_paid_by",
    "agent",
    "consignor_name",
    "consignor_address",
    "consignor_city",
    "consignor_contact",
    "consignor_pan",
    "consignor_gst",
    "consignee_name",
    "consignee_address",
    "consignee_city",
    "consignee_contact",
    "consignee_pan",
    "consignee_gst",
    "billing_to_name",
    "billing_to_address",
    "billing_to_city",
    "billing_to_contact",
    "billing_to_pan",
    "billing_to_gst",
    "items",
    "weight_mt",
    "actual_weight_mt",
    "height",
    "extra_height",
    "freight",
    "rate",
    "rate_on",
    "employee",
    "truck_driver_no",
    "remark",
];

lazy_static! {
    // $1 = id, $2..$51 = columnas del formulario, $52..$54 = diseño y autoría
    static ref INSERT_SQL: String = {
        let placeholders: Vec<String> = (2..=FORM_COLUMNS.len() + 1)
            .map(|n| format!("${}", n))
            .collect();
        let next = FORM_COLUMNS.len() + 2;
        format!(
            "INSERT INTO lr_details (id, {}, template_design, custom_logo_url, created_by) \
             VALUES ($1, {}, ${}, ${}, ${}) RETURNING *",
            FORM_COLUMNS.join(", "),
            placeholders.join(", "),
            next,
            next + 1,
            next + 2,
        )
    };

    static ref UPDATE_SQL: String = {
        let assignments: Vec<String> = FORM_COLUMNS
            .iter()
            .enumerate()
            .map(|(idx, column)| format!("{} = ${}", column, idx + 2))
            .collect();
        format!(
            "UPDATE lr_details SET {}, updated_at = now() WHERE id = $1 RETURNING *",
            assignments.join(", ")
        )
    };
}

/// Fila tal como vive en `lr_details`
#[derive(Debug, sqlx::FromRow)]
pub struct LrRow {
    pub id: Uuid,
    pub lr_type: String,
    pub lr_no: String,
    pub truck_no: String,
    pub from_place: String,
    pub to_place: String,
    pub date: NaiveDate,
    pub invoice: Option<String>,
    pub invoice_amount: Option<Decimal>,
    pub invoice_date: Option<NaiveDate>,
    pub po_no: Option<String>,
    pub po_date: Option<NaiveDate>,
    pub eway_bill_no: Option<String>,
    pub eway_bill_date: Option<NaiveDate>,
    pub eway_ex_date: Option<NaiveDate>,
    pub method_of_packing: Option<String>,
    pub address_of_delivery: Option<String>,
    pub charged_weight: Option<Decimal>,
    pub lorry_type: Option<String>,
    pub billing_party: Option<String>,
    pub gst_paid_by: Option<String>,
    pub agent: Option<String>,
    pub consignor_name: Option<String>,
    pub consignor_address: Option<String>,
    pub consignor_city: Option<String>,
    pub consignor_contact: Option<String>,
    pub consignor_pan: Option<String>,
    pub consignor_gst: Option<String>,
    pub consignee_name: Option<String>,
    pub consignee_address: Option<String>,
    pub consignee_city: Option<String>,
    pub consignee_contact: Option<String>,
    pub consignee_pan: Option<String>,
    pub consignee_gst: Option<String>,
    pub billing_to_name: Option<String>,
    pub billing_to_address: Option<String>,
    pub billing_to_city: Option<String>,
    pub billing_to_contact: Option<String>,
    pub billing_to_pan: Option<String>,
    pub billing_to_gst: Option<String>,
    pub items: Option<Json<Vec<LineItem>>>,
    pub weight_mt: Option<Decimal>,
    pub actual_weight_mt: Option<Decimal>,
    pub height: Option<Decimal>,
    pub extra_height: Option<Decimal>,
    pub freight: Option<Decimal>,
    pub rate: Option<Decimal>,
    pub rate_on: Option<String>,
    pub employee: Option<String>,
    pub truck_driver_no: Option<String>,
    pub remark: Option<String>,
    pub template_design: Option<String>,
    pub custom_logo_url: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<LrRow> for LrRecord {
    type Error = AppError;

    fn try_from(row: LrRow) -> Result<Self, Self::Error> {
        let lr_type = row
            .lr_type
            .parse()
            .map_err(|e| AppError::Store(format!("LR {}: {}", row.id, e)))?;

        // Un diseño desconocido en la base no impide imprimir
        let template_design = row
            .template_design
            .as_deref()
            .and_then(|design| design.parse::<TemplateDesign>().ok())
            .unwrap_or_default();

        Ok(LrRecord {
            id: row.id,
            details: LrDetails {
                lr_type,
                lr_no: row.lr_no,
                truck_no: row.truck_no,
                from_place: row.from_place,
                to_place: row.to_place,
                date: row.date,
                invoice: row.invoice,
                invoice_amount: row.invoice_amount,
                invoice_date: row.invoice_date,
                po_no: row.po_no,
                po_date: row.po_date,
                eway_bill_no: row.eway_bill_no,
                eway_bill_date: row.eway_bill_date,
                eway_ex_date: row.eway_ex_date,
                method_of_packing: row.method_of_packing,
                address_of_delivery: row.address_of_delivery,
                charged_weight: row.charged_weight,
                lorry_type: row.lorry_type,
                billing_party: row.billing_party,
                gst_paid_by: row.gst_paid_by,
                agent: row.agent,
                consignor: Party {
                    name: row.consignor_name,
                    address: row.consignor_address,
                    city: row.consignor_city,
                    contact: row.consignor_contact,
                    pan: row.consignor_pan,
                    gst: row.consignor_gst,
                },
                consignee: Party {
                    name: row.consignee_name,
                    address: row.consignee_address,
                    city: row.consignee_city,
                    contact: row.consignee_contact,
                    pan: row.consignee_pan,
                    gst: row.consignee_gst,
                },
                billing_to: Party {
                    name: row.billing_to_name,
                    address: row.billing_to_address,
                    city: row.billing_to_city,
                    contact: row.billing_to_contact,
                    pan: row.billing_to_pan,
                    gst: row.billing_to_gst,
                },
                items: row.items.map(|items| items.0).unwrap_or_default(),
                weight_mt: row.weight_mt,
                actual_weight_mt: row.actual_weight_mt,
                height: row.height,
                extra_height: row.extra_height,
                freight: row.freight,
                rate: row.rate,
                rate_on: row.rate_on,
                employee: row.employee,
                truck_driver_no: row.truck_driver_no,
                remark: row.remark,
                template_design,
                custom_logo_url: row.custom_logo_url,
                created_by: row.created_by,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

type LrQuery<'q> = QueryAs<'q, Postgres, LrRow, PgArguments>;

fn bind_party<'q>(query: LrQuery<'q>, party: &'q Party) -> LrQuery<'q> {
    query
        .bind(party.name.as_deref())
        .bind(party.address.as_deref())
        .bind(party.city.as_deref())
        .bind(party.contact.as_deref())
        .bind(party.pan.as_deref())
        .bind(party.gst.as_deref())
}

/// Bindear las columnas de `FORM_COLUMNS` en orden
fn bind_form_fields<'q>(query: LrQuery<'q>, d: &'q LrDetails) -> LrQuery<'q> {
    let query = query
        .bind(d.lr_type.as_str())
        .bind(d.lr_no.as_str())
        .bind(d.truck_no.as_str())
        .bind(d.from_place.as_str())
        .bind(d.to_place.as_str())
        .bind(d.date)
        .bind(d.invoice.as_deref())
        .bind(d.invoice_amount)
        .bind(d.invoice_date)
        .bind(d.po_no.as_deref())
        .bind(d.po_date)
        .bind(d.eway_bill_no.as_deref())
        .bind(d.eway_bill_date)
        .bind(d.eway_ex_date)
        .bind(d.method_of_packing.as_deref())
        .bind(d.address_of_delivery.as_deref())
        .bind(d.charged_weight)
        .bind(d.lorry_type.as_deref())
        .bind(d.billing_party.as_deref())
        .bind(d.gst_paid_by.as_deref())
        .bind(d.agent.as_deref());

    let query = bind_party(query, &d.consignor);
    let query = bind_party(query, &d.consignee);
    let query = bind_party(query, &d.billing_to);

    query
        .bind(Json(&d.items))
        .bind(d.weight_mt)
        .bind(d.actual_weight_mt)
        .bind(d.height)
        .bind(d.extra_height)
        .bind(d.freight)
        .bind(d.rate)
        .bind(d.rate_on.as_deref())
        .bind(d.employee.as_deref())
        .bind(d.truck_driver_no.as_deref())
        .bind(d.remark.as_deref())
}

pub struct PgLrStore {
    pool: PgPool,
}

impl PgLrStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LrStore for PgLrStore {
    async fn list_all(&self) -> AppResult<Vec<LrRecord>> {
        let rows = sqlx::query_as::<_, LrRow>("SELECT * FROM lr_details ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(LrRecord::try_from).collect()
    }

    async fn count(&self) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM lr_details")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LrRecord>> {
        let row = sqlx::query_as::<_, LrRow>("SELECT * FROM lr_details WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(LrRecord::try_from).transpose()
    }

    async fn insert(&self, details: &LrDetails) -> AppResult<LrRecord> {
        let id = Uuid::new_v4();
        let query = sqlx::query_as::<_, LrRow>(INSERT_SQL.as_str()).bind(id);

        let row = bind_form_fields(query, details)
            .bind(details.template_design.as_str())
            .bind(details.custom_logo_url.as_deref())
            .bind(details.created_by.as_deref())
            .fetch_one(&self.pool)
            .await?;

        LrRecord::try_from(row)
    }

    async fn update(&self, id: Uuid, details: &LrDetails) -> AppResult<Option<LrRecord>> {
        let query = sqlx::query_as::<_, LrRow>(UPDATE_SQL.as_str()).bind(id);

        let row = bind_form_fields(query, details)
            .fetch_optional(&self.pool)
            .await?;

        row.map(LrRecord::try_from).transpose()
    }

    async fn update_design(
        &self,
        id: Uuid,
        design: TemplateDesign,
        logo_url: Option<&str>,
    ) -> AppResult<Option<LrRecord>> {
        let row = sqlx::query_as::<_, LrRow>(
            r#"
            UPDATE lr_details
            SET template_design = $2, custom_logo_url = $3, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(design.as_str())
        .bind(logo_url)
        .fetch_optional(&self.pool)
        .await?;

        row.map(LrRecord::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM lr_details WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
