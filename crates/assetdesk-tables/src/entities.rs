//! Row types of the list endpoints
//!
//! Field names follow the backend's column names. Every field is optional:
//! the backend sends `null` freely and older rows lack newer columns.

use serde::{Deserialize, Serialize};

use crate::column::{ColumnSpec, text};

/// Render a 0/1 database flag
fn flag(value: &Option<i64>, yes: &str, no: &str) -> String {
	match value {
		Some(1) => yes.to_string(),
		Some(_) => no.to_string(),
		None => "N/A".to_string(),
	}
}

/// Render an optional boolean
fn yes_no(value: &Option<bool>) -> String {
	match value {
		Some(true) => "Yes".to_string(),
		Some(false) => "No".to_string(),
		None => "N/A".to_string(),
	}
}

/// Entry of the asset register
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AssetRow {
	#[serde(rename = "AssetRecID")]
	pub asset_rec_id: Option<i64>,
	pub asset_code: Option<String>,
	#[serde(rename = "AssetERP_Code")]
	pub asset_erp_code: Option<String>,
	pub asset_type: Option<String>,
	pub asset_description: Option<String>,
	pub purchase_date: Option<String>,
	pub owner_company: Option<String>,
	pub purchase_employee_name: Option<String>,
	pub po_no: Option<String>,
	pub po_date: Option<String>,
	pub purchased_price: Option<f64>,
	pub vendor_name: Option<String>,
	pub warranty_date: Option<String>,
	pub is_issued: Option<i64>,
	pub user_cont_no: Option<String>,
	pub user_company: Option<String>,
	pub issued_date: Option<String>,
	pub issued_site: Option<String>,
	pub is_active: Option<i64>,
	pub is_scrapped: Option<i64>,
	pub scrapped_date: Option<String>,
	pub remarks1: Option<String>,
	pub remarks2: Option<String>,
	pub remarks3: Option<String>,
	pub asset_brand: Option<String>,
	pub asset_model: Option<String>,
	pub asset_slno: Option<String>,
	pub location: Option<String>,
	pub current_emp_no: Option<String>,
}

impl AssetRow {
	/// Columns of the asset register table
	pub fn columns() -> Vec<ColumnSpec<Self>> {
		vec![
			ColumnSpec::new("AssetCode", "Asset Code", |r: &Self| text(&r.asset_code)),
			ColumnSpec::new("AssetERP_Code", "ERP Code", |r: &Self| text(&r.asset_erp_code)),
			ColumnSpec::new("AssetType", "Type", |r: &Self| text(&r.asset_type)),
			ColumnSpec::new("AssetDescription", "Description", |r: &Self| {
				text(&r.asset_description)
			}),
			ColumnSpec::new("AssetBrand", "Brand", |r: &Self| text(&r.asset_brand)),
			ColumnSpec::new("AssetModel", "Model", |r: &Self| text(&r.asset_model)),
			ColumnSpec::new("AssetSlno", "Serial No", |r: &Self| text(&r.asset_slno)),
			ColumnSpec::new("OwnerCompany", "Owner Company", |r: &Self| text(&r.owner_company)),
			ColumnSpec::new("PurchaseDate", "Purchase Date", |r: &Self| text(&r.purchase_date)),
			ColumnSpec::new("PurchasedPrice", "Price", |r: &Self| text(&r.purchased_price)),
			ColumnSpec::new("VendorName", "Vendor", |r: &Self| text(&r.vendor_name)),
			ColumnSpec::new("WarrantyDate", "Warranty", |r: &Self| text(&r.warranty_date)),
			ColumnSpec::new("IsIssued", "Issued", |r: &Self| {
				flag(&r.is_issued, "Issued", "In Stock")
			}),
			ColumnSpec::new("CurrentEmpNo", "Current Holder", |r: &Self| text(&r.current_emp_no)),
			ColumnSpec::new("Location", "Location", |r: &Self| text(&r.location)),
			ColumnSpec::new("IsActive", "Active", |r: &Self| {
				flag(&r.is_active, "Active", "Inactive")
			}),
			ColumnSpec::new("IsScrapped", "Scrapped", |r: &Self| {
				flag(&r.is_scrapped, "Scrapped", "In Use")
			}),
		]
	}
}

/// Transfer request between two holders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TransferRow {
	#[serde(rename = "RecID")]
	pub rec_id: Option<i64>,
	pub transfer_code: Option<String>,
	pub asset_code: Option<String>,
	pub asset_desc: Option<String>,
	pub transfer_from: Option<String>,
	pub transfer_to: Option<String>,
	pub reason_of_transfer: Option<String>,
	pub approve_by_trans_to: Option<i64>,
	pub approve_by_admin: Option<i64>,
	pub remarks: Option<String>,
	pub entered_by: Option<String>,
}

impl TransferRow {
	/// Columns of the transfer tables
	pub fn columns() -> Vec<ColumnSpec<Self>> {
		vec![
			ColumnSpec::new("TransferCode", "Transfer Code", |r: &Self| text(&r.transfer_code)),
			ColumnSpec::new("AssetCode", "Asset Code", |r: &Self| text(&r.asset_code)),
			ColumnSpec::new("AssetDesc", "Description", |r: &Self| text(&r.asset_desc)),
			ColumnSpec::new("TransferFrom", "From", |r: &Self| text(&r.transfer_from)),
			ColumnSpec::new("TransferTo", "To", |r: &Self| text(&r.transfer_to)),
			ColumnSpec::new("ReasonOfTransfer", "Reason", |r: &Self| text(&r.reason_of_transfer)),
			ColumnSpec::new("ApproveByTransTo", "Receiver", |r: &Self| {
				approval(&r.approve_by_trans_to)
			}),
			ColumnSpec::new("ApproveByAdmin", "Admin", |r: &Self| approval(&r.approve_by_admin)),
			ColumnSpec::new("EnteredBy", "Entered By", |r: &Self| text(&r.entered_by)),
		]
	}
}

/// Render an approval state: 1 approved, 0 rejected, unset pending
fn approval(value: &Option<i64>) -> String {
	match value {
		Some(1) => "Approved".to_string(),
		Some(0) => "Rejected".to_string(),
		_ => "Pending".to_string(),
	}
}

/// Employee record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EmployeeRow {
	#[serde(rename = "EmpRecID")]
	pub emp_rec_id: Option<i64>,
	pub emp_no: Option<String>,
	pub emp_name: Option<String>,
	#[serde(rename = "EmpCompID")]
	pub emp_comp_id: Option<String>,
	#[serde(rename = "EmpDeptID")]
	pub emp_dept_id: Option<String>,
	pub emp_cont_no: Option<String>,
	pub is_active: Option<bool>,
	pub username: Option<String>,
	pub last_login: Option<String>,
	pub last_location: Option<String>,
	pub is_admin: Option<bool>,
}

impl EmployeeRow {
	/// Columns of the user management table
	pub fn columns() -> Vec<ColumnSpec<Self>> {
		vec![
			ColumnSpec::new("EmpNo", "Emp No", |r: &Self| text(&r.emp_no)),
			ColumnSpec::new("EmpName", "Name", |r: &Self| text(&r.emp_name)),
			ColumnSpec::new("EmpCompID", "Company", |r: &Self| text(&r.emp_comp_id)),
			ColumnSpec::new("EmpDeptID", "Department", |r: &Self| text(&r.emp_dept_id)),
			ColumnSpec::new("EmpContNo", "Contact", |r: &Self| text(&r.emp_cont_no)),
			ColumnSpec::new("Username", "Username", |r: &Self| text(&r.username)),
			ColumnSpec::new("IsActive", "Active", |r: &Self| yes_no(&r.is_active)),
			ColumnSpec::new("IsAdmin", "Admin", |r: &Self| yes_no(&r.is_admin)),
			ColumnSpec::new("LastLogin", "Last Login", |r: &Self| text(&r.last_login))
				.filterable(false),
		]
	}
}

/// Company with its headcount and device totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyRow {
	#[serde(rename = "CompRecID")]
	pub comp_rec_id: Option<i64>,
	#[serde(rename = "CompCode")]
	pub comp_code: Option<String>,
	#[serde(rename = "CompName")]
	pub comp_name: Option<String>,
	#[serde(rename = "employeeCount")]
	pub employee_count: Option<i64>,
	#[serde(rename = "activeDeviceCount")]
	pub active_device_count: Option<i64>,
	#[serde(rename = "purchasedDeviceCount")]
	pub purchased_device_count: Option<i64>,
}

impl CompanyRow {
	/// Columns of the company overview
	pub fn columns() -> Vec<ColumnSpec<Self>> {
		vec![
			ColumnSpec::new("CompCode", "Code", |r: &Self| text(&r.comp_code)),
			ColumnSpec::new("CompName", "Company", |r: &Self| text(&r.comp_name)),
			ColumnSpec::new("employeeCount", "Employees", |r: &Self| text(&r.employee_count))
				.filterable(false),
			ColumnSpec::new("activeDeviceCount", "Active Devices", |r: &Self| {
				text(&r.active_device_count)
			})
			.filterable(false),
			ColumnSpec::new("purchasedDeviceCount", "Purchased Devices", |r: &Self| {
				text(&r.purchased_device_count)
			})
			.filterable(false),
		]
	}
}

/// Entry of the issue register
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IssueRow {
	#[serde(rename = "IssueRecID")]
	pub issue_rec_id: Option<i64>,
	#[serde(rename = "IssuedID")]
	pub issued_id: Option<i64>,
	pub asset_code: Option<String>,
	pub issue_date: Option<String>,
	pub issue_type: Option<String>,
	pub issue_empno: Option<String>,
	pub issue_emp_name: Option<String>,
	pub issue_location: Option<String>,
	pub issue_status: Option<i64>,
	/// Spelled `ReturenStatus` by the backend
	#[serde(rename = "ReturenStatus")]
	pub return_status: Option<i64>,
	pub return_date: Option<String>,
	pub issued_by: Option<String>,
	pub remarks1: Option<String>,
	pub remarks2: Option<String>,
}

impl IssueRow {
	/// Columns of the issue register table
	pub fn columns() -> Vec<ColumnSpec<Self>> {
		vec![
			ColumnSpec::new("AssetCode", "Asset Code", |r: &Self| text(&r.asset_code)),
			ColumnSpec::new("IssueDate", "Issue Date", |r: &Self| text(&r.issue_date)),
			ColumnSpec::new("IssueType", "Type", |r: &Self| text(&r.issue_type)),
			ColumnSpec::new("IssueEmpno", "Emp No", |r: &Self| text(&r.issue_empno)),
			ColumnSpec::new("IssueEmpName", "Employee", |r: &Self| text(&r.issue_emp_name)),
			ColumnSpec::new("IssueLocation", "Location", |r: &Self| text(&r.issue_location)),
			ColumnSpec::new("IssueStatus", "Issued", |r: &Self| {
				flag(&r.issue_status, "Issued", "Not Issued")
			}),
			ColumnSpec::new("ReturenStatus", "Returned", |r: &Self| {
				flag(&r.return_status, "Returned", "Not Returned")
			}),
			ColumnSpec::new("ReturnDate", "Return Date", |r: &Self| text(&r.return_date)),
			ColumnSpec::new("IssuedBy", "Issued By", |r: &Self| text(&r.issued_by)),
		]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_asset_row_reads_backend_names() {
		let row: AssetRow = serde_json::from_str(
			r#"{"AssetRecID":3,"AssetCode":"A-17","AssetERP_Code":"ERP-9","AssetType":"laptop","PurchasedPrice":1250.5,"IsIssued":1,"Remarks1":null,"CurrentEmpNo":"E-042"}"#,
		)
		.unwrap();

		assert_eq!(row.asset_rec_id, Some(3));
		assert_eq!(row.asset_erp_code.as_deref(), Some("ERP-9"));
		assert_eq!(row.purchased_price, Some(1250.5));
		assert_eq!(row.remarks1, None);
		assert_eq!(row.current_emp_no.as_deref(), Some("E-042"));
	}

	#[rstest]
	fn test_employee_row_ignores_password() {
		let row: EmployeeRow = serde_json::from_str(
			r#"{"EmpRecID":1,"EmpNo":"E-042","EmpCompID":"IT001","Password":"x","IsAdmin":true}"#,
		)
		.unwrap();
		assert_eq!(row.emp_comp_id.as_deref(), Some("IT001"));
		assert_eq!(row.is_admin, Some(true));
		assert!(!serde_json::to_string(&row).unwrap().contains("Password"));
	}

	#[rstest]
	fn test_issue_row_return_status_spelling() {
		let row: IssueRow = serde_json::from_str(r#"{"ReturenStatus":1}"#).unwrap();
		assert_eq!(row.return_status, Some(1));
	}

	#[rstest]
	#[case(Some(1), "Approved")]
	#[case(Some(0), "Rejected")]
	#[case(None, "Pending")]
	fn test_transfer_approval_cell(#[case] admin: Option<i64>, #[case] expected: &str) {
		let row = TransferRow {
			approve_by_admin: admin,
			..TransferRow::default()
		};
		let column = TransferRow::columns()
			.into_iter()
			.find(|c| c.accessor() == "ApproveByAdmin")
			.unwrap();
		assert_eq!(column.render(&row), expected);
	}

	#[rstest]
	fn test_column_accessors_match_serialized_names() {
		let value = serde_json::to_value(AssetRow::default()).unwrap();
		for column in AssetRow::columns() {
			assert!(
				value.get(column.accessor()).is_some(),
				"{} is not a field",
				column.accessor()
			);
		}
	}
}
